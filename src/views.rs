//! Page rendering. The markup lives in `templates/index.hbs`; this module
//! only shapes the data handed to it.

use handlebars::{Handlebars, TemplateError};
use serde::Serialize;
use std::sync::LazyLock;

use crate::error::ViewError;
use crate::models::{ClassListing, TimeSlot};
use crate::validation::{MAX_CAPACITY, MIN_CAPACITY};

const INDEX: &str = "index";

static TEMPLATES: LazyLock<Result<Handlebars<'static>, TemplateError>> = LazyLock::new(|| {
    let mut registry = Handlebars::new();
    registry.register_template_string(INDEX, include_str!("../templates/index.hbs"))?;
    Ok(registry)
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SlotOption {
    value: &'static str,
    label: String,
}

#[derive(Debug, Serialize)]
struct ListingView {
    id: i64,
    class_name: String,
    instructor: String,
    time_slot: String,
    capacity: i32,
    description: Option<String>,
    added: String,
    zip: String,
}

#[derive(Debug, Serialize)]
struct SearchView {
    zip: String,
    count: usize,
    listings: Vec<ListingView>,
}

#[derive(Debug, Serialize)]
pub struct PageContext {
    notice: Option<Notice>,
    search: Option<SearchView>,
    time_slots: Vec<SlotOption>,
    min_capacity: i32,
    max_capacity: i32,
}

impl Default for PageContext {
    fn default() -> Self {
        Self {
            notice: None,
            search: None,
            time_slots: TimeSlot::ALL
                .into_iter()
                .map(|slot| SlotOption {
                    value: slot.label(),
                    label: slot.to_string(),
                })
                .collect(),
            min_capacity: MIN_CAPACITY,
            max_capacity: MAX_CAPACITY,
        }
    }
}

impl PageContext {
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    pub fn with_results(mut self, zip: &str, listings: Vec<ClassListing>) -> Self {
        let listings: Vec<ListingView> = listings
            .into_iter()
            .map(|listing| ListingView {
                id: listing.id,
                time_slot: listing.time_slot.to_string(),
                added: listing.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
                class_name: listing.class_name,
                instructor: listing.instructor,
                capacity: listing.capacity,
                description: listing.description,
                zip: zip.to_string(),
            })
            .collect();
        self.search = Some(SearchView {
            zip: zip.to_string(),
            count: listings.len(),
            listings,
        });
        self
    }
}

/// Fails early when the embedded template does not parse.
pub fn check_templates() -> Result<(), ViewError> {
    TEMPLATES
        .as_ref()
        .map(|_| ())
        .map_err(|e| ViewError::Template(e.to_string()))
}

pub fn render_page(ctx: &PageContext) -> Result<String, ViewError> {
    let registry = TEMPLATES
        .as_ref()
        .map_err(|e| ViewError::Template(e.to_string()))?;
    Ok(registry.render(INDEX, ctx)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn listing() -> ClassListing {
        ClassListing {
            id: 9,
            class_name: "Yoga <Flow>".into(),
            zip_code: "10001".into(),
            instructor: "O'Neil".into(),
            time_slot: TimeSlot::Evening,
            description: None,
            capacity: 30,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 18, 5, 0).unwrap(),
        }
    }

    #[test]
    fn template_parses() {
        check_templates().unwrap();
    }

    #[test]
    fn listing_heading_is_class_name() {
        let page = render_page(&PageContext::default().with_results("10001", vec![listing()])).unwrap();
        assert!(page.contains("<h3>Yoga &lt;Flow&gt;</h3>"));
        assert!(!page.contains("O'Neil"));
        assert!(page.contains("Evening (5:00 PM - 10:00 PM)"));
        assert!(page.contains(r#"action="/classes/9/delete""#));
        assert!(page.contains(r#"<input type="hidden" name="zip" value="10001">"#));
        assert!(page.contains("Added 2024-03-01 18:05 UTC"));
        assert!(page.contains("1 class(es) found in 10001."));
    }

    #[test]
    fn empty_search_says_so() {
        let page = render_page(
            &PageContext::default()
                .with_notice(Notice::success("Class deleted."))
                .with_results("94110", vec![]),
        )
        .unwrap();
        assert!(page.contains("No classes found in 94110."));
        assert!(page.contains(r#"<p class="notice success">Class deleted.</p>"#));
    }

    #[test]
    fn blank_page_offers_every_slot() {
        let page = render_page(&PageContext::default()).unwrap();
        for slot in TimeSlot::ALL {
            assert!(page.contains(&format!(r#"<option value="{}">"#, slot.label())));
        }
        assert!(page.contains(r#"min="1" max="100""#));
        assert!(!page.contains("No classes found"));
        assert!(!page.contains("class=\"notice"));
    }
}
