use anyhow::Context;
use log::info;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN, REFERER};
use reqwest::{redirect, Client};
use scraper::Html;
use url::Url;
use urlencoding::encode;
use crate::config::Credentials;
use crate::error::ScrapeError;
use crate::utils::document::selector;

const LOGIN_PATH: &str = "login/index.php";
const REGISTRATION_PATH: &str = "registration/Registration_FEST_student_EarlyRegistrationBeta.php";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const INVALID_LOGIN_MARKER: &str = "Invalid login";
const MAX_REDIRECTS: usize = 5;

pub fn validate_credentials(credentials: &Credentials) -> Result<(), ScrapeError> {
    if credentials.username.is_empty() || credentials.password.is_empty() {
        return Err(ScrapeError::Validation("Username and password required".to_string()));
    }
    Ok(())
}

// Replaces the first field with this name and drops any later ones, or appends it.
fn set_field(fields: &mut Vec<(String, String)>, name: &str, value: &str) {
    match fields.iter().position(|(n, _)| n == name) {
        Some(i) => {
            fields[i].1 = value.to_string();
            let mut seen = 0;
            fields.retain(|(n, _)| {
                if n != name {
                    return true;
                }
                seen += 1;
                seen == 1
            });
        }
        None => fields.push((name.to_string(), value.to_string())),
    }
}

// Builds the login form from the inputs of the `#login` form, hidden tokens included,
// with the credentials filled in.
pub fn login_form_fields(login_page: &str, credentials: &Credentials) -> Vec<(String, String)> {
    let document = Html::parse_document(login_page);
    let mut fields: Vec<(String, String)> = document
        .select(&selector("#login input"))
        .filter_map(|input| {
            let name = input.value().attr("name")?;
            Some((name.to_string(), input.value().attr("value").unwrap_or("").to_string()))
        })
        .collect();

    set_field(&mut fields, "username", &credentials.username);
    set_field(&mut fields, "password", &credentials.password);
    set_field(&mut fields, "testcookies", "1");
    fields
}

pub fn encode_form(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{}={}", encode(name), encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn ensure_logged_in(login_response: &str) -> Result<(), ScrapeError> {
    if login_response.contains(INVALID_LOGIN_MARKER) {
        return Err(ScrapeError::Authentication);
    }
    Ok(())
}

fn build_client() -> anyhow::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

    Client::builder()
        .cookie_store(true)
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .redirect(redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .context("Failed to build the client")
}

// Logs into the portal and returns the markup of the registration page.
pub async fn retrieve_registration_page(base_url: &Url, credentials: &Credentials) -> Result<String, ScrapeError> {
    validate_credentials(credentials)?;

    let client = build_client()?;
    let login_url = base_url.join(LOGIN_PATH).context("Invalid login URL")?;
    let registration_url = base_url.join(REGISTRATION_PATH).context("Invalid registration URL")?;

    info!("Fetching login page {}", login_url);
    let login_page = client
        .get(login_url.clone())
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .context("Failed to fetch login page")?
        .text()
        .await
        .context("Failed to read login page")?;

    let form = encode_form(&login_form_fields(&login_page, credentials));

    info!("Submitting login form");
    let login_response = client
        .post(login_url.clone())
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(ORIGIN, base_url.origin().ascii_serialization())
        .header(REFERER, login_url.as_str())
        .body(form)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .context("Failed to send login request")?
        .text()
        .await
        .context("Failed to read login response")?;

    ensure_logged_in(&login_response)?;

    info!("Fetching registration page {}", registration_url);
    let registration_page = client
        .get(registration_url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .context("Failed to fetch registration page")?
        .text()
        .await
        .context("Failed to read registration page")?;

    Ok(registration_page)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials { username: username.to_string(), password: password.to_string() }
    }

    #[test]
    fn empty_credentials_are_rejected() {
        assert!(matches!(validate_credentials(&credentials("", "secret")), Err(ScrapeError::Validation(_))));
        assert!(matches!(validate_credentials(&credentials("user", "")), Err(ScrapeError::Validation(_))));
        assert!(validate_credentials(&credentials("user", "secret")).is_ok());
    }

    #[test]
    fn login_form_keeps_hidden_inputs_and_sets_credentials() {
        let page = r#"
            <form id="login" method="post">
                <input type="hidden" name="logintoken" value="abc123">
                <input type="text" name="username" value="prefilled">
                <input type="password" name="password">
                <input type="submit" value="Log in">
                <input type="hidden" name="username" value="duplicate">
            </form>
            <input type="hidden" name="outside" value="x">"#;
        let fields = login_form_fields(page, &credentials("1234-fet", "p@ss word"));

        let expected: Vec<(String, String)> = [
            ("logintoken", "abc123"),
            ("username", "1234-fet"),
            ("password", "p@ss word"),
            ("testcookies", "1"),
        ]
        .iter()
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect();
        assert_eq!(fields, expected);
    }

    #[test]
    fn form_values_are_percent_encoded() {
        let fields = vec![("username".to_string(), "a b".to_string()), ("password".to_string(), "p&=1".to_string())];
        assert_eq!(encode_form(&fields), "username=a%20b&password=p%26%3D1");
    }

    #[test]
    fn invalid_login_marker_is_an_authentication_error() {
        assert!(matches!(ensure_logged_in("<div>Invalid login, please try again</div>"), Err(ScrapeError::Authentication)));
        assert!(ensure_logged_in("<div>Welcome back</div>").is_ok());
    }
}
