//! HTML fragments shared by the containers

use billed_utils::escape_html;

const BILL_ICON_SVG: &str = r#"<svg xmlns='http://www.w3.org/2000/svg' width='200' height='200' viewBox='0 0 24 24' fill='none' stroke='#9ca3af' stroke-width='1'><path d='M6 2h9l5 5v15H6z'/><path d='M14 2v6h6'/><path d='M9 13h6M9 17h6'/></svg>"#;

const ARROW_ICON_SVG: &str = r#"<svg xmlns='http://www.w3.org/2000/svg' class='h-5 w-5' fill='none' viewBox='0 0 24 24' stroke='currentColor'><path stroke-linecap='round' stroke-linejoin='round' stroke-width='2' d='M19 9l-7 7-7-7'/></svg>"#;

pub const EYE_ICON_SVG: &str = r#"<svg xmlns='http://www.w3.org/2000/svg' class='h-5 w-5' fill='none' viewBox='0 0 24 24' stroke='currentColor'><path stroke-linecap='round' stroke-linejoin='round' stroke-width='2' d='M15 12a3 3 0 11-6 0 3 3 0 016 0z'/><path stroke-linecap='round' stroke-linejoin='round' stroke-width='2' d='M2.458 12C3.732 7.943 7.523 5 12 5c4.478 0 8.268 2.943 9.542 7-1.274 4.057-5.064 7-9.542 7-4.477 0-8.268-2.943-9.542-7z'/></svg>"#;

/// Placeholder shown in the dashboard's right panel when no ticket is open
pub fn big_billed_icon() -> String {
    format!(
        "<div id='big-billed-icon' data-testid='big-billed-icon' class='flex justify-center items-center h-full'>{}</div>",
        BILL_ICON_SVG
    )
}

/// Arrow toggling a dashboard section; rotated when the section is open
pub fn arrow_icon(index: u8, expanded: bool) -> String {
    let rotation = if expanded { "rotate-0" } else { "-rotate-90" };
    format!(
        "<span id='arrow-icon{index}' data-testid='arrow-icon{index}' class='cursor-pointer transform {rotation}' \
hx-get='/admin/dashboard/sections/{index}' hx-target='#dashboard-content' hx-swap='innerHTML'>{svg}</span>",
        index = index,
        rotation = rotation,
        svg = ARROW_ICON_SVG
    )
}

/// Replaces a view whose data could not be loaded
pub fn error_page(label: &str) -> String {
    format!(
        "<div class='error-page text-center py-12' data-testid='error-message'><p class='text-xl font-bold text-red-600'>{}</p></div>",
        escape_html(label)
    )
}

/// Inline error banner kept above the rest of a view
pub fn error_banner(label: &str) -> String {
    format!(
        "<div class='mb-4 p-3 rounded-lg bg-red-50 text-red-700' data-testid='error-banner'>{}</div>",
        escape_html(label)
    )
}

pub fn loading_page() -> String {
    "<div class='text-center py-12 text-gray-500' id='loading'>Loading...</div>".to_string()
}

/// Proof modal filled by the eye icons
#[derive(Debug, Clone, PartialEq)]
pub struct Modal {
    /// Element id of the modal (`modaleFile` or `modaleFileAdmin`)
    pub id: &'static str,
    /// Markup injected into `.modal-body`
    pub body: String,
    pub open: bool,
}

impl Modal {
    pub fn render(&self) -> String {
        let visibility = if self.open { "show" } else { "hidden" };
        format!(
            r#"<div class='modal fixed inset-0 bg-black/50 flex items-center justify-center {visibility}' id='{id}' data-testid='{id}'>
    <div class='modal-dialog bg-white rounded-xl shadow-lg p-4'>
        <div class='modal-header flex justify-between mb-2'><h5 class='font-semibold'>Justificatif</h5>
            <button type='button' class='close text-gray-400' onclick="this.closest('.modal').remove()">&times;</button></div>
        <div class='modal-body'>{body}</div>
    </div>
</div>"#,
            visibility = visibility,
            id = self.id,
            body = self.body
        )
    }
}
