use crate::{Locator, ResolveError};

const MIN_ADDRESS_SEGMENTS: usize = 4;

fn is_house_number(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|byte| byte.is_ascii_digit())
}

pub fn normalize_field(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Splits street text into `(street_name, house_number)`.
///
/// The first all-digit token becomes the house number. Every all-digit token
/// is dropped from the name; the rest keep their order, joined by one space.
pub fn decompose_street(street: &str) -> (String, Option<String>) {
    let mut house_number = None;
    let mut name_tokens = Vec::new();

    for token in street.split_whitespace() {
        if is_house_number(token) {
            if house_number.is_none() {
                house_number = Some(token.to_string());
            }
        } else {
            name_tokens.push(token);
        }
    }

    (name_tokens.join(" "), house_number)
}

impl Locator {
    pub fn from_fields(department: &str, province: &str, district: &str, street: &str) -> Self {
        let (street_name, house_number) = decompose_street(&normalize_field(street));
        Self {
            department: normalize_field(department),
            province: normalize_field(province),
            district: normalize_field(district),
            street_name,
            house_number,
        }
    }

    /// Parses `"<department>, <province>, <district>, <street> [<number>]"`.
    ///
    /// Segments past the fourth are ignored.
    pub fn parse_full_address(text: &str) -> Result<Self, ResolveError> {
        let segments: Vec<&str> = text.split(',').collect();
        if segments.len() < MIN_ADDRESS_SEGMENTS {
            return Err(ResolveError::Validation(format!(
                "expected `department, province, district, street number` but found {} segment(s)",
                segments.len()
            )));
        }

        Ok(Self::from_fields(
            segments[0],
            segments[1],
            segments[2],
            segments[3],
        ))
    }
}
