// Deep-link construction for WhatsApp's public URL schemes
//
// Four URL shapes exist and their exact form is a compatibility contract:
//   https://wa.me/<phone>?text=...                  (portable share link)
//   https://api.whatsapp.com/send?phone=...&text=.. (mobile, redirects to app)
//   https://web.whatsapp.com/send?phone=...&text=.. (desktop browser)
//   whatsapp://send?phone=...&text=..               (desktop native app)
//
// Building a URL never touches the network; launching it is the caller's job.

/// Where the link will be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Phone or tablet — the send endpoint redirects into the installed app.
    Mobile,
    Desktop,
}

/// How a desktop user wants the chat opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMethod {
    /// WhatsApp Web in the browser.
    Web,
    /// The native desktop application via the whatsapp:// protocol.
    App,
}

impl OpenMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpenMethod::Web => "web",
            OpenMethod::App => "app",
        }
    }
}

impl std::str::FromStr for OpenMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "web" => Ok(OpenMethod::Web),
            "app" => Ok(OpenMethod::App),
            other => Err(format!("unknown open method: {other} (expected 'web' or 'app')")),
        }
    }
}

/// Compose the full international number: the dial code is prepended unless
/// the local part already carries an explicit `+` prefix.
pub fn full_phone(local: &str, dial_code: &str) -> String {
    if local.starts_with('+') {
        local.to_string()
    } else {
        format!("{dial_code}{local}")
    }
}

/// Strip the separators users type (spaces and dashes). The leading `+` is
/// kept; the URL endpoints accept it.
pub fn clean_phone(full: &str) -> String {
    full.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

/// URL for starting a chat, selected by platform and open method.
pub fn chat_url(
    phone: &str,
    message: Option<&str>,
    platform: Platform,
    method: OpenMethod,
) -> String {
    let text = encoded_text(message);
    let query_text = text
        .as_deref()
        .map(|t| format!("&text={t}"))
        .unwrap_or_default();

    match (platform, method) {
        // Mobile always goes through the api endpoint, which hands off
        // to the installed app regardless of the chosen method.
        (Platform::Mobile, _) => {
            format!("https://api.whatsapp.com/send?phone={phone}{query_text}")
        }
        (Platform::Desktop, OpenMethod::App) => {
            format!("whatsapp://send?phone={phone}{query_text}")
        }
        (Platform::Desktop, OpenMethod::Web) => {
            format!("https://web.whatsapp.com/send?phone={phone}{query_text}")
        }
    }
}

/// The short wa.me link — the portable form for sharing outside the tool.
pub fn share_url(phone: &str, message: Option<&str>) -> String {
    match encoded_text(message) {
        Some(text) => format!("https://wa.me/{phone}?text={text}"),
        None => format!("https://wa.me/{phone}"),
    }
}

fn encoded_text(message: Option<&str>) -> Option<String> {
    message
        .filter(|m| !m.is_empty())
        .map(|m| urlencoding::encode(m).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_phone_prepends_dial_code() {
        assert_eq!(full_phone("612345678", "+34"), "+34612345678");
    }

    #[test]
    fn test_full_phone_keeps_explicit_prefix() {
        assert_eq!(full_phone("+15551234567", "+34"), "+15551234567");
    }

    #[test]
    fn test_clean_phone_strips_separators() {
        assert_eq!(clean_phone("+34 612-345-678"), "+34612345678");
    }

    #[test]
    fn test_mobile_url() {
        let url = chat_url("+34612345678", Some("hola"), Platform::Mobile, OpenMethod::Web);
        assert_eq!(url, "https://api.whatsapp.com/send?phone=+34612345678&text=hola");

        // Method is irrelevant on mobile
        let app = chat_url("+34612345678", Some("hola"), Platform::Mobile, OpenMethod::App);
        assert_eq!(url, app);
    }

    #[test]
    fn test_desktop_web_url() {
        let url = chat_url("+15551234567", None, Platform::Desktop, OpenMethod::Web);
        assert_eq!(url, "https://web.whatsapp.com/send?phone=+15551234567");
    }

    #[test]
    fn test_desktop_app_url() {
        let url = chat_url("+15551234567", Some("hi there"), Platform::Desktop, OpenMethod::App);
        assert_eq!(url, "whatsapp://send?phone=+15551234567&text=hi%20there");
    }

    #[test]
    fn test_share_url() {
        assert_eq!(share_url("+491701234567", None), "https://wa.me/+491701234567");
        assert_eq!(
            share_url("+491701234567", Some("¿Cómo estás?")),
            "https://wa.me/+491701234567?text=%C2%BFC%C3%B3mo%20est%C3%A1s%3F"
        );
    }

    #[test]
    fn test_empty_message_omits_text_param() {
        let url = chat_url("+1555", Some(""), Platform::Desktop, OpenMethod::Web);
        assert!(!url.contains("text="));
        assert_eq!(share_url("+1555", Some("")), "https://wa.me/+1555");
    }
}
