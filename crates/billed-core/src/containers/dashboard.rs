//! Admin validation dashboard
//!
//! Bills are split into three collapsible sections by status. Each section
//! and each ticket keeps its own open/closed flag; at most one ticket is open
//! at a time and its edit form fills the right panel.

use std::collections::HashMap;

use billed_utils::{escape_html, format_amount};

use crate::error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger, StoreError};
use crate::format::{format_date, format_status};
use crate::models::Bill;
use crate::session::SessionContext;
use crate::store::StoreRef;
use crate::types::{BillStatus, StatusGroup};
use crate::views::{self, Modal, EYE_ICON_SVG};

pub const MODAL_ID: &str = "modaleFileAdmin";

/// Bills of `bills` whose status is `status`, in their original order
pub fn filtered_bills<'a>(bills: &'a [Bill], status: &BillStatus) -> Vec<&'a Bill> {
    bills.iter().filter(|bill| &bill.status == status).collect()
}

fn card(bill: &Bill) -> String {
    let (first_name, last_name) = bill.holder_names();
    format!(
        r#"<div class='bill-card cursor-pointer border rounded-lg p-3 mb-2 hover:bg-gray-50' id='open-bill{id}' data-testid='open-bill{id}'
    hx-get='/admin/dashboard/bills/{id}/edit' hx-target='#dashboard-right' hx-swap='innerHTML'>
    <div class='bill-card-name-container flex justify-between'>
        <div class='bill-card-name font-medium'>{first} {last}</div>
        <span class='bill-card-grey text-gray-400'>...</span>
    </div>
    <div class='name-price-container flex justify-between'>
        <span>{name}</span>
        <span>{amount}</span>
    </div>
    <div class='date-type-container flex justify-between text-sm text-gray-500'>
        <span>{date}</span>
        <span>{expense_type}</span>
    </div>
</div>"#,
        id = escape_html(&bill.id),
        first = escape_html(&first_name),
        last = escape_html(&last_name),
        name = escape_html(&bill.name),
        amount = format_amount(bill.amount),
        date = escape_html(&format_date(&bill.date)),
        expense_type = escape_html(&bill.expense_type),
    )
}

/// Card list for `bills`; an empty input gives an empty fragment
pub fn cards<'a, I>(bills: I) -> String
where
    I: IntoIterator<Item = &'a Bill>,
{
    bills.into_iter().map(card).collect::<Vec<_>>().join("")
}

/// Edit form of the right panel
fn dashboard_form(bill: &Bill) -> String {
    let file_name = bill.file_name.as_deref().unwrap_or("");
    let decision = if bill.status == BillStatus::Pending {
        format!(
            r#"<form class='mt-4' hx-target='#dashboard-content' hx-swap='innerHTML'>
        <label for='commentary2' class='block text-sm text-gray-500'>Ajouter un commentaire</label>
        <textarea id='commentary2' name='comment_admin' data-testid='commentary2' class='w-full border rounded-lg p-2' rows='3'></textarea>
        <div class='flex gap-2 mt-2'>
            <button type='submit' id='btn-accept-bill' data-testid='btn-accept-bill-d' hx-post='/admin/dashboard/bills/{id}/accept' class='px-4 py-2 bg-green-600 text-white rounded-lg'>Accepter</button>
            <button type='submit' id='btn-refuse-bill' data-testid='btn-refuse-bill-d' hx-post='/admin/dashboard/bills/{id}/refuse' class='px-4 py-2 bg-red-600 text-white rounded-lg'>Refuser</button>
        </div>
    </form>"#,
            id = escape_html(&bill.id)
        )
    } else {
        format!(
            r#"<div class='mt-4'>
        <p class='text-sm text-gray-500'>Commentaire admin</p>
        <p data-testid='comment-admin'>{comment}</p>
        <p class='text-sm text-gray-500 mt-2'>Statut</p>
        <p>{status}</p>
    </div>"#,
            comment = escape_html(&bill.comment_admin),
            status = escape_html(&format_status(&bill.status))
        )
    };

    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6' data-testid='dashboard-form'>
    <h3 class='text-lg font-semibold mb-4'>{name}</h3>
    <div class='grid grid-cols-2 gap-4'>
        <div><p class='text-sm text-gray-500'>Type de dépense</p><p>{expense_type}</p></div>
        <div><p class='text-sm text-gray-500'>Date</p><p>{date}</p></div>
        <div><p class='text-sm text-gray-500'>Montant TTC</p><p>{amount}</p></div>
        <div><p class='text-sm text-gray-500'>TVA</p><p>{vat} ({pct} %)</p></div>
        <div class='col-span-2'><p class='text-sm text-gray-500'>Commentaire</p><p>{commentary}</p></div>
        <div class='col-span-2 flex items-center gap-2'>
            <span>{file_name}</span>
            <span id='icon-eye-d' data-testid='icon-eye-d' class='cursor-pointer' hx-get='/admin/dashboard/bills/{id}/file' hx-target='#modal-slot' hx-swap='innerHTML'>{eye}</span>
        </div>
    </div>
    {decision}
</div>"#,
        name = escape_html(&bill.name),
        expense_type = escape_html(&bill.expense_type),
        date = escape_html(&format_date(&bill.date)),
        amount = format_amount(bill.amount),
        vat = escape_html(&bill.vat),
        pct = bill.pct,
        commentary = escape_html(&bill.commentary),
        file_name = escape_html(file_name),
        id = escape_html(&bill.id),
        eye = EYE_ICON_SVG,
        decision = decision,
    )
}

/// Container behind the admin "Validations" view
pub struct Dashboard {
    store: Option<StoreRef>,
    session: SessionContext,
    bills: Vec<Bill>,
    sections: HashMap<StatusGroup, bool>,
    tickets: HashMap<String, bool>,
    error: Option<String>,
    modal_width: u32,
    logger: DefaultErrorLogger,
}

impl Dashboard {
    pub fn new(store: Option<StoreRef>, session: SessionContext, modal_width: u32) -> Self {
        Self {
            store,
            session,
            bills: Vec::new(),
            sections: HashMap::new(),
            tickets: HashMap::new(),
            error: None,
            modal_width,
            logger: DefaultErrorLogger,
        }
    }

    /// Start from an already known collection
    pub fn with_bills(mut self, bills: Vec<Bill>) -> Self {
        self.bills = bills;
        self
    }

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn is_expanded(&self, group: StatusGroup) -> bool {
        self.sections.get(&group).copied().unwrap_or(false)
    }

    /// Id of the ticket whose form is shown, if any
    pub fn open_ticket(&self) -> Option<&str> {
        self.tickets
            .iter()
            .find(|(_, open)| **open)
            .map(|(id, _)| id.as_str())
    }

    fn find_bill(&self, bill_id: &str) -> CoreResult<&Bill> {
        self.bills
            .iter()
            .find(|b| b.id == bill_id)
            .ok_or_else(|| CoreError::BillNotFound { id: bill_id.to_string() })
    }

    fn report(&self, error: &CoreError, operation: &str) {
        let context = ErrorContext::new(operation).with_user(self.session.email());
        self.logger.log_error(error, &context);
    }

    /// Fetch every bill of every employee and keep them as the current collection
    pub async fn get_bills_all_users(&mut self) -> Result<Vec<Bill>, StoreError> {
        let Some(store) = &self.store else {
            return Ok(self.bills.clone());
        };
        let bills = store.bills().list().await?;
        log::debug!("Dashboard loaded {} bills", bills.len());
        self.bills = bills.clone();
        Ok(bills)
    }

    /// Load the bills and render the view, or the error page if the store rejects
    pub async fn load(&mut self) -> String {
        match self.get_bills_all_users().await {
            Ok(_) => {
                self.error = None;
                self.render()
            }
            Err(e) => {
                let label = e.label();
                self.report(&CoreError::from(e), "dashboard.load");
                views::error_page(&label)
            }
        }
    }

    /// Card container of `group`: filled when expanded, empty when collapsed
    fn section_container(&self, group: StatusGroup) -> String {
        let index = group.index();
        let content = if self.is_expanded(group) {
            cards(filtered_bills(&self.bills, &group.status()))
        } else {
            String::new()
        };
        format!(
            "<div id='status-bills-container{}' data-testid='status-bills-container{}' class='mt-2'>{}</div>",
            index, index, content
        )
    }

    /// Toggle a section and return its card container
    pub fn handle_show_tickets(&mut self, group: StatusGroup) -> String {
        let expanded = !self.is_expanded(group);
        self.sections.insert(group, expanded);
        log::debug!("Section {} {}", group.index(), if expanded { "expanded" } else { "collapsed" });
        self.section_container(group)
    }

    /// Toggle a ticket and return the right panel
    pub fn handle_edit_ticket(&mut self, bill_id: &str) -> CoreResult<String> {
        self.find_bill(bill_id)?;
        let open = !self.tickets.get(bill_id).copied().unwrap_or(false);
        for flag in self.tickets.values_mut() {
            *flag = false;
        }
        self.tickets.insert(bill_id.to_string(), open);
        self.error = None;
        Ok(self.right_panel())
    }

    /// Admin modal with the proof of a bill: an image, or the document inline
    pub fn handle_click_icon_eye(&self, bill_id: &str) -> CoreResult<Modal> {
        let bill = self.find_bill(bill_id)?;
        let url = escape_html(bill.file_url.as_deref().unwrap_or(""));
        let img_width = self.modal_width / 2;
        let body = if bill.has_image_proof() {
            format!(
                "<div style='text-align: center;'><img width={} src='{}' alt='Bill'/></div>",
                img_width, url
            )
        } else {
            format!(
                "<div style='text-align: center;'><iframe src='{}' width='100%' height='{}' title='Bill'></iframe></div>",
                url, img_width
            )
        };
        Ok(Modal {
            id: MODAL_ID,
            body,
            open: true,
        })
    }

    pub async fn handle_accept_submit(&mut self, bill_id: &str, comment: Option<String>) -> String {
        self.submit_decision(bill_id, BillStatus::Accepted, comment).await
    }

    pub async fn handle_refuse_submit(&mut self, bill_id: &str, comment: Option<String>) -> String {
        self.submit_decision(bill_id, BillStatus::Refused, comment).await
    }

    async fn submit_decision(&mut self, bill_id: &str, status: BillStatus, comment: Option<String>) -> String {
        let found = self.find_bill(bill_id).map(Bill::clone);
        let mut bill = match found {
            Ok(bill) => bill,
            Err(e) => {
                self.report(&e, "dashboard.decision");
                self.error = Some(e.label());
                return self.render();
            }
        };
        bill.status = status;
        bill.comment_admin = comment.unwrap_or_default();

        match self.update_bill(&bill).await {
            Ok(updated) => {
                if let Some(slot) = self.bills.iter_mut().find(|b| b.id == updated.id) {
                    *slot = updated;
                }
                self.tickets.remove(bill_id);
                self.error = None;
            }
            Err(e) => {
                self.report(&e, "dashboard.decision");
                self.error = Some(e.label());
            }
        }
        self.render()
    }

    async fn update_bill(&self, bill: &Bill) -> CoreResult<Bill> {
        match &self.store {
            Some(store) => Ok(store.bills().update(bill).await?),
            None => {
                log::debug!("No store configured, bill {} updated locally", bill.id);
                Ok(bill.clone())
            }
        }
    }

    /// Right panel: open ticket form or the big bill icon, with any pending error above
    pub fn right_panel(&self) -> String {
        let banner = self.error.as_deref().map(views::error_banner).unwrap_or_default();
        let content = self
            .open_ticket()
            .and_then(|id| self.find_bill(id).ok())
            .map(dashboard_form)
            .unwrap_or_else(views::big_billed_icon);
        format!("{}{}", banner, content)
    }

    /// Full dashboard content: section headers with counts, cards, right panel
    pub fn render(&self) -> String {
        let mut left = String::new();
        for group in StatusGroup::ALL {
            let count = filtered_bills(&self.bills, &group.status()).len();
            left.push_str(&format!(
                "<div class='status-bills-header flex justify-between items-center py-2 border-b'><h3 class='font-semibold'>{} ({})</h3>{}</div>{}",
                group.label(),
                count,
                views::arrow_icon(group.index(), self.is_expanded(group)),
                self.section_container(group)
            ));
        }

        format!(
            r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Validations</h2></div>
<div class='grid grid-cols-1 lg:grid-cols-2 gap-6'>
    <div class='dashboard-left-container bg-white rounded-xl shadow-sm p-6'>{}</div>
    <div class='dashboard-right-container' id='dashboard-right'>{}</div>
</div>"#,
            left,
            self.right_panel()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewBillPayload, SessionInfo};
    use crate::store::{BillsStore, Store};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    fn fixture_bills() -> Vec<Bill> {
        serde_json::from_value(serde_json::json!([
            {
                "id": "47qAXb6fIm2zOKkLzMro", "email": "a@a", "type": "Hôtel et logement",
                "name": "encore", "date": "2004-04-04", "amount": 400, "vat": "80", "pct": 20,
                "commentary": "séminaire billed", "commentAdmin": "ok",
                "fileUrl": "https://test.storage.tld/preview-facture.jpg",
                "fileName": "preview-facture-free-201801-pdf-1.jpg", "status": "pending"
            },
            {
                "id": "BeKy5Mo4jkmdfPGYpTxZ", "email": "a@a", "type": "Restaurants et bars",
                "name": "test1", "date": "2001-01-01", "amount": 100, "vat": "", "pct": 20,
                "commentary": "plop", "commentAdmin": "en fait non",
                "fileUrl": "https://test.storage.tld/facture.pdf",
                "fileName": "1592770761.jpeg", "status": "refused"
            },
            {
                "id": "UIUZtnPQvnbFnB0ozvJh", "email": "a@a", "type": "Services en ligne",
                "name": "test3", "date": "2003-03-03", "amount": 300, "vat": "60", "pct": 20,
                "commentary": "", "commentAdmin": "bon bah d'accord",
                "fileUrl": "https://test.storage.tld/facture-client.pdf",
                "fileName": "facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.pdf",
                "status": "accepted"
            },
            {
                "id": "qcCK3SzECmaZAGRrHjaC", "email": "a@a", "type": "Restaurants et bars",
                "name": "test2", "date": "2002-02-02", "amount": 200, "vat": "40", "pct": 20,
                "commentary": "test2", "commentAdmin": "pas la bonne facture",
                "fileUrl": "https://test.storage.tld/nope.pdf",
                "fileName": "preview-facture-free-201801-pdf-1.jpg", "status": "refused"
            }
        ]))
        .unwrap()
    }

    /// Store recording updates; `list` and `update` fail when configured to
    #[derive(Default)]
    struct RecordingStore {
        bills: Vec<Bill>,
        list_error: Option<StoreError>,
        update_error: Option<StoreError>,
        updates: Mutex<Vec<Bill>>,
    }

    #[async_trait]
    impl BillsStore for RecordingStore {
        async fn list(&self) -> Result<Vec<Bill>, StoreError> {
            match &self.list_error {
                Some(e) => Err(e.clone()),
                None => Ok(self.bills.clone()),
            }
        }
        async fn create(&self, _payload: NewBillPayload) -> Result<Bill, StoreError> {
            Err(StoreError::message("unused"))
        }
        async fn update(&self, bill: &Bill) -> Result<Bill, StoreError> {
            if let Some(e) = &self.update_error {
                return Err(e.clone());
            }
            self.updates.lock().unwrap().push(bill.clone());
            Ok(bill.clone())
        }
    }

    #[async_trait]
    impl Store for RecordingStore {
        fn bills(&self) -> &dyn BillsStore {
            self
        }
        async fn login(&self, _credentials: &str) -> Result<SessionInfo, StoreError> {
            Ok(SessionInfo::default())
        }
        async fn create_user(&self, _user: &str) -> Result<SessionInfo, StoreError> {
            Ok(SessionInfo::default())
        }
    }

    fn dashboard(store: Option<StoreRef>) -> Dashboard {
        Dashboard::new(store, SessionContext::in_memory(), 800)
    }

    fn card_count(html: &str) -> usize {
        html.matches("class='bill-card ").count()
    }

    #[test]
    fn test_filtered_bills_by_status() {
        let bills = fixture_bills();
        assert_eq!(filtered_bills(&bills, &BillStatus::Pending).len(), 1);
        assert_eq!(filtered_bills(&bills, &BillStatus::Accepted).len(), 1);
        let refused = filtered_bills(&bills, &BillStatus::Refused);
        let ids: Vec<&str> = refused.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["BeKy5Mo4jkmdfPGYpTxZ", "qcCK3SzECmaZAGRrHjaC"]);
    }

    #[test]
    fn test_filtered_bills_empty_cases() {
        assert!(filtered_bills(&[], &BillStatus::Pending).is_empty());
        let bills = fixture_bills();
        assert!(filtered_bills(&bills, &BillStatus::from("paid")).is_empty());
    }

    #[test]
    fn test_cards_count() {
        let bills = fixture_bills();
        assert_eq!(cards(&Vec::<Bill>::new()), "");
        let html = cards(&bills);
        assert_eq!(card_count(&html), bills.len());
        assert!(html.contains("data-testid='open-bill47qAXb6fIm2zOKkLzMro'"));
        assert!(html.contains("4 Avr. 04"));
        assert!(html.contains("400 €"));
    }

    #[test]
    fn test_unparsed_date_is_escaped() {
        let mut bill = fixture_bills().remove(0);
        bill.date = "<script>alert(1)</script>".to_string();

        let html = cards([&bill]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));

        let html = dashboard_form(&bill);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_show_tickets_toggles_each_section_independently() {
        let mut dashboard = dashboard(None).with_bills(fixture_bills());

        let html = dashboard.handle_show_tickets(StatusGroup::Pending);
        assert!(dashboard.is_expanded(StatusGroup::Pending));
        assert!(html.contains("open-bill47qAXb6fIm2zOKkLzMro"));

        let html = dashboard.handle_show_tickets(StatusGroup::Accepted);
        assert!(html.contains("open-billUIUZtnPQvnbFnB0ozvJh"));

        let html = dashboard.handle_show_tickets(StatusGroup::Refused);
        assert!(html.contains("open-billBeKy5Mo4jkmdfPGYpTxZ"));
        assert_eq!(card_count(&html), 2);

        let html = dashboard.handle_show_tickets(StatusGroup::Pending);
        assert!(!dashboard.is_expanded(StatusGroup::Pending));
        assert_eq!(card_count(&html), 0);
        assert!(dashboard.is_expanded(StatusGroup::Accepted));
        assert!(dashboard.is_expanded(StatusGroup::Refused));
    }

    #[test]
    fn test_edit_ticket_twice_shows_big_icon() {
        let mut dashboard = dashboard(None).with_bills(fixture_bills());
        dashboard.handle_show_tickets(StatusGroup::Pending);

        let panel = dashboard.handle_edit_ticket("47qAXb6fIm2zOKkLzMro").unwrap();
        assert!(panel.contains("data-testid='dashboard-form'"));
        assert!(panel.contains("data-testid='btn-accept-bill-d'"));
        assert_eq!(dashboard.open_ticket(), Some("47qAXb6fIm2zOKkLzMro"));

        let panel = dashboard.handle_edit_ticket("47qAXb6fIm2zOKkLzMro").unwrap();
        assert!(panel.contains("data-testid='big-billed-icon'"));
        assert!(dashboard.open_ticket().is_none());
    }

    #[test]
    fn test_opening_a_ticket_closes_the_other() {
        let mut dashboard = dashboard(None).with_bills(fixture_bills());
        dashboard.handle_edit_ticket("47qAXb6fIm2zOKkLzMro").unwrap();
        let panel = dashboard.handle_edit_ticket("UIUZtnPQvnbFnB0ozvJh").unwrap();
        assert_eq!(dashboard.open_ticket(), Some("UIUZtnPQvnbFnB0ozvJh"));
        // decided bills show the admin comment instead of the buttons
        assert!(panel.contains("bon bah d&#39;accord"));
        assert!(!panel.contains("btn-accept-bill-d"));
    }

    #[test]
    fn test_edit_unknown_ticket() {
        let mut dashboard = dashboard(None).with_bills(fixture_bills());
        assert_eq!(
            dashboard.handle_edit_ticket("nope").unwrap_err(),
            CoreError::BillNotFound { id: "nope".to_string() }
        );
    }

    #[test]
    fn test_icon_eye_image_and_document() {
        let dashboard = dashboard(None).with_bills(fixture_bills());
        let modal = dashboard.handle_click_icon_eye("47qAXb6fIm2zOKkLzMro").unwrap();
        assert_eq!(modal.id, "modaleFileAdmin");
        assert!(modal.body.contains("<img width=400 src='https://test.storage.tld/preview-facture.jpg'"));

        let modal = dashboard.handle_click_icon_eye("UIUZtnPQvnbFnB0ozvJh").unwrap();
        assert!(modal.body.contains("<iframe src='https://test.storage.tld/facture-client.pdf'"));
        assert!(modal.render().contains("data-testid='modaleFileAdmin'"));
    }

    #[tokio::test]
    async fn test_load_renders_counts_and_placeholder() {
        let store = Arc::new(RecordingStore {
            bills: fixture_bills(),
            ..Default::default()
        });
        let mut dashboard = dashboard(Some(store));
        let html = dashboard.load().await;
        assert!(html.contains("Validations"));
        assert!(html.contains("En attente (1)"));
        assert!(html.contains("Validé (1)"));
        assert!(html.contains("Refusé (2)"));
        assert!(html.contains("data-testid='big-billed-icon'"));
        assert_eq!(dashboard.bills().len(), 4);
    }

    #[tokio::test]
    async fn test_load_renders_error_404() {
        let store = Arc::new(RecordingStore {
            list_error: Some(StoreError::message("Erreur 404")),
            ..Default::default()
        });
        let html = dashboard(Some(store)).load().await;
        assert!(html.contains("Erreur 404"));
        assert!(!html.contains("En attente"));
    }

    #[tokio::test]
    async fn test_load_renders_error_500() {
        let store = Arc::new(RecordingStore {
            list_error: Some(StoreError::new(500, "Internal Server Error")),
            ..Default::default()
        });
        let html = dashboard(Some(store)).load().await;
        assert!(html.contains("Erreur 500"));
    }

    #[tokio::test]
    async fn test_accept_moves_bill_out_of_pending() {
        let store = Arc::new(RecordingStore {
            bills: fixture_bills(),
            ..Default::default()
        });
        let mut dashboard = dashboard(Some(store.clone()));
        dashboard.load().await;
        dashboard.handle_show_tickets(StatusGroup::Pending);
        dashboard.handle_edit_ticket("47qAXb6fIm2zOKkLzMro").unwrap();

        let html = dashboard
            .handle_accept_submit("47qAXb6fIm2zOKkLzMro", Some("validé".to_string()))
            .await;

        assert!(html.contains("En attente (0)"));
        assert!(html.contains("Validé (2)"));
        assert!(html.contains("data-testid='big-billed-icon'"));
        assert!(filtered_bills(dashboard.bills(), &BillStatus::Pending).is_empty());
        assert!(dashboard.open_ticket().is_none());

        let updates = store.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].status, BillStatus::Accepted);
        assert_eq!(updates[0].comment_admin, "validé");
    }

    #[tokio::test]
    async fn test_refuse_without_store_updates_locally() {
        let mut dashboard = dashboard(None).with_bills(fixture_bills());
        dashboard.handle_edit_ticket("47qAXb6fIm2zOKkLzMro").unwrap();
        let html = dashboard.handle_refuse_submit("47qAXb6fIm2zOKkLzMro", None).await;
        assert!(html.contains("Refusé (3)"));
        assert!(html.contains("data-testid='big-billed-icon'"));
    }

    #[tokio::test]
    async fn test_update_failure_is_shown_inline() {
        let store = Arc::new(RecordingStore {
            bills: fixture_bills(),
            update_error: Some(StoreError::new(500, "Internal Server Error")),
            ..Default::default()
        });
        let mut dashboard = dashboard(Some(store));
        dashboard.load().await;
        dashboard.handle_edit_ticket("47qAXb6fIm2zOKkLzMro").unwrap();

        let html = dashboard.handle_accept_submit("47qAXb6fIm2zOKkLzMro", None).await;
        assert!(html.contains("data-testid='error-banner'"));
        assert!(html.contains("Erreur 500"));
        assert!(html.contains("En attente (1)"));
        // the form stays open so the admin can retry
        assert!(html.contains("data-testid='dashboard-form'"));
    }
}
