use serde::Deserialize;

use crate::error::ValidationError;
use crate::models::{NewListing, TimeSlot, ZipCode};

pub const MIN_CAPACITY: i32 = 1;
pub const MAX_CAPACITY: i32 = 100;

/// Raw add-class form fields as posted by the browser.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListingForm {
    pub class_name: String,
    pub zip_code: String,
    pub instructor: String,
    pub time_slot: String,
    pub description: String,
    pub capacity: String,
}

pub fn validate_listing(form: &ListingForm) -> Result<NewListing, ValidationError> {
    let class_name = form.class_name.trim();
    let zip_code = form.zip_code.trim();
    let instructor = form.instructor.trim();

    let missing: Vec<&'static str> = [
        ("class name", class_name),
        ("zip code", zip_code),
        ("instructor", instructor),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(field, _)| field)
    .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let zip_code = ZipCode::parse(&form.zip_code)?;
    let capacity = parse_capacity(&form.capacity)?;
    let time_slot: TimeSlot = form.time_slot.parse()?;
    let description = Some(form.description.trim())
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    Ok(NewListing {
        class_name: class_name.to_string(),
        zip_code,
        instructor: instructor.to_string(),
        time_slot,
        description,
        capacity,
    })
}

pub fn parse_capacity(raw: &str) -> Result<i32, ValidationError> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|c| (MIN_CAPACITY..=MAX_CAPACITY).contains(c))
        .ok_or(ValidationError::CapacityOutOfRange)
}
