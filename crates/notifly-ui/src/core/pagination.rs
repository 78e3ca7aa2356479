//! Result-message selection and query-path building for the template list.
//!
//! Window and meta arithmetic live in `notifly-api-models` so the server and
//! the client share one source of truth; this module owns the presentation
//! side only.

use notifly_api_models::{TemplateFormat, TemplateLanguage};

/// Pick the single result message for a rendered page.
///
/// Priority order matters: an empty page for a non-empty dataset must not be
/// reported as "no notifications available".
#[must_use]
pub fn result_message(
    item_count: u32,
    page: u32,
    page_count: u32,
    total_count: u64,
    is_new_user: bool,
    is_empty_page: bool,
) -> String {
    if is_new_user {
        return "Welcome! Notifications you send will show up here.".to_string();
    }
    if is_empty_page {
        return format!(
            "Nothing on this page. Pick one of the {page_count} available page{}.",
            plural(u64::from(page_count))
        );
    }
    if total_count == 0 {
        return "No notifications available.".to_string();
    }
    format!(
        "{item_count} notification{} from page {page} of {page_count}",
        plural(u64::from(item_count))
    )
}

const fn plural(count: u64) -> &'static str {
    if count > 1 { "s" } else { "" }
}

/// Build the `GET /template` request path for a page of the template list.
#[must_use]
pub fn template_list_path(
    page: u32,
    size: u32,
    language: Option<TemplateLanguage>,
    format: Option<TemplateFormat>,
    is_ascending: bool,
) -> String {
    let mut path = format!("/template?page={page}&size={size}&isAscending={is_ascending}");
    if let Some(language) = language {
        let tag = match language {
            TemplateLanguage::En => "en",
            TemplateLanguage::Km => "km",
        };
        path.push_str("&language=");
        path.push_str(&urlencoding::encode(tag));
    }
    if let Some(format) = format {
        let tag = match format {
            TemplateFormat::Text => "text",
            TemplateFormat::Html => "html",
        };
        path.push_str("&format=");
        path.push_str(&urlencoding::encode(tag));
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_wins_over_everything() {
        let message = result_message(0, 1, 0, 0, true, false);
        assert!(message.contains("Welcome"));
    }

    #[test]
    fn empty_page_names_the_page_count() {
        let message = result_message(0, 9, 2, 3, false, true);
        assert!(message.contains('2'));
        assert!(message.contains("pages"));
    }

    #[test]
    fn zero_total_reports_no_notifications() {
        assert_eq!(
            result_message(0, 1, 0, 0, false, false),
            "No notifications available."
        );
    }

    #[test]
    fn generic_branch_counts_and_pluralizes() {
        assert_eq!(
            result_message(1, 2, 3, 21, false, false),
            "1 notification from page 2 of 3"
        );
        assert_eq!(
            result_message(10, 1, 3, 21, false, false),
            "10 notifications from page 1 of 3"
        );
    }

    #[test]
    fn template_path_carries_filters() {
        assert_eq!(
            template_list_path(2, 10, None, None, true),
            "/template?page=2&size=10&isAscending=true"
        );
        assert_eq!(
            template_list_path(
                1,
                25,
                Some(TemplateLanguage::Km),
                Some(TemplateFormat::Html),
                false
            ),
            "/template?page=1&size=25&isAscending=false&language=km&format=html"
        );
    }
}
