use crate::config::IndexFields;
use crate::Locator;
use serde_json::{json, Value};

/// Boolean query body for one locator.
///
/// Administrative levels are exact `term`s, the street name is a fuzzy
/// `match`, and a house number adds a nested door filter.
pub fn build_search_body(locator: &Locator, fields: &IndexFields) -> Value {
    let mut bool_query = json!({
        "must": [
            {"term": {fields.department.as_str(): locator.department}},
            {"term": {fields.province.as_str(): locator.province}},
            {"term": {fields.district.as_str(): locator.district}},
            {
                "match": {
                    fields.street_name.as_str(): {
                        "query": locator.street_name,
                        "fuzziness": "AUTO"
                    }
                }
            }
        ]
    });

    if let Some(number) = &locator.house_number {
        bool_query["filter"] = json!([house_number_filter(number, fields)]);
    }

    json!({
        "size": 1,
        "query": {"bool": bool_query}
    })
}

fn house_number_filter(number: &str, fields: &IndexFields) -> Value {
    json!({
        "nested": {
            "path": fields.house_numbers_path,
            "query": {
                "bool": {
                    "must": [{"term": {fields.house_number.as_str(): number}}]
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locator(house_number: Option<&str>) -> Locator {
        Locator {
            department: "LIMA".to_string(),
            province: "LIMA".to_string(),
            district: "MIRAFLORES".to_string(),
            street_name: "AV. AREQUIPA".to_string(),
            house_number: house_number.map(str::to_string),
        }
    }

    #[test]
    fn administrative_levels_are_exact_terms() {
        let body = build_search_body(&locator(Some("1234")), &IndexFields::default());
        let must = body.pointer("/query/bool/must").and_then(Value::as_array).unwrap();

        assert_eq!(must.len(), 4);
        assert_eq!(must[0], json!({"term": {"cod_departament.keyword": "LIMA"}}));
        assert_eq!(must[1], json!({"term": {"cod_province.keyword": "LIMA"}}));
        assert_eq!(must[2], json!({"term": {"cod_district.keyword": "MIRAFLORES"}}));
        assert_eq!(
            must[3],
            json!({"match": {"name": {"query": "AV. AREQUIPA", "fuzziness": "AUTO"}}})
        );
    }

    #[test]
    fn house_number_adds_nested_filter() {
        let body = build_search_body(&locator(Some("1234")), &IndexFields::default());
        assert_eq!(
            body.pointer("/query/bool/filter").unwrap(),
            &json!([{
                "nested": {
                    "path": "housenumbers",
                    "query": {"bool": {"must": [{"term": {"housenumbers.number.keyword": "1234"}}]}}
                }
            }])
        );
    }

    #[test]
    fn missing_house_number_has_no_filter() {
        let body = build_search_body(&locator(None), &IndexFields::default());
        assert!(body.pointer("/query/bool/filter").is_none());
    }

    #[test]
    fn custom_field_names_are_used() {
        let fields = IndexFields {
            district: "district_code".to_string(),
            ..IndexFields::default()
        };
        let body = build_search_body(&locator(None), &fields);
        assert_eq!(
            body.pointer("/query/bool/must/2").unwrap(),
            &json!({"term": {"district_code": "MIRAFLORES"}})
        );
    }
}
