//! Login page rendering - Full page endpoints

use billed_core::views::error_banner;
use billed_core::UserType;

use crate::AppState;

/// One login form; `error` is shown above the form that failed
fn login_form(user_type: UserType, error: Option<&str>) -> String {
    let (prefix, title, action) = match user_type {
        UserType::Employee => ("employee", "Employé", "/login/employee"),
        UserType::Admin => ("admin", "Administration", "/login/admin"),
    };
    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6 w-80'>
    <h2 class='text-lg font-semibold mb-4'>{title}</h2>
    {error}
    <form method='post' action='{action}' data-testid='form-{prefix}' class='space-y-3'>
        <div>
            <label for='{prefix}-email-input' class='block text-sm text-gray-500'>Votre email</label>
            <input type='email' name='email' id='{prefix}-email-input' data-testid='{prefix}-email-input' required class='w-full border rounded-lg p-2' placeholder='johndoe@email.com'>
        </div>
        <div>
            <label for='{prefix}-password-input' class='block text-sm text-gray-500'>Mot de passe</label>
            <input type='password' name='password' id='{prefix}-password-input' data-testid='{prefix}-password-input' required class='w-full border rounded-lg p-2' placeholder='******'>
        </div>
        <button type='submit' id='btn-{prefix}' data-testid='{prefix}-login-button' class='w-full py-2 bg-indigo-600 text-white rounded-lg'>Se connecter</button>
    </form>
</div>"#,
        title = title,
        error = error.map(error_banner).unwrap_or_default(),
        action = action,
        prefix = prefix,
    )
}

/// Both forms side by side; `failed` names the form whose submission failed
pub fn render_login(failed: Option<(UserType, &str)>) -> String {
    let error_for = |user_type: UserType| {
        failed
            .filter(|(failed_type, _)| *failed_type == user_type)
            .map(|(_, label)| label)
    };
    format!(
        r#"<div class='text-center'>
    <h1 class='text-3xl font-bold text-indigo-700 mb-8'>Billed</h1>
    <div class='flex flex-wrap gap-6 justify-center'>{}{}</div>
</div>"#,
        login_form(UserType::Employee, error_for(UserType::Employee)),
        login_form(UserType::Admin, error_for(UserType::Admin))
    )
}

pub async fn page_login(
    _state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    axum::response::Html(crate::page_response(&headers, "Connexion", "/", &render_login(None)))
}
