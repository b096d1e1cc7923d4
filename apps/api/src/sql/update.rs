use serde_json::{Map, Value};

use super::{quote_ident, ColumnMap, Fragments, SqlError, SqlValue};

/// The `SET` list of an `UPDATE` and its positional values.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate {
    /// e.g. `"name"=$1, "num_employees"=$2`
    pub set_clause: String,
    pub values: Vec<SqlValue>,
}

impl PartialUpdate {
    /// Placeholder for a condition the caller appends after the `SET` list,
    /// such as `WHERE id = $N`.
    pub fn next_placeholder(&self) -> String {
        format!("${}", self.values.len() + 1)
    }
}

/// Builds the `SET` clause for a partial update.
///
/// Fragments follow the key order of `fields`: the first key gets `$1`, the
/// second `$2`, and so on, and `values` is in that same order. Every key must
/// resolve through `columns`; an empty `fields` is rejected.
pub fn build_partial_update(
    fields: &Map<String, Value>,
    columns: &ColumnMap,
) -> Result<PartialUpdate, SqlError> {
    if fields.is_empty() {
        return Err(SqlError::NoData);
    }

    let mut fragments = Fragments::default();
    for (field, value) in fields {
        let column = columns.resolve(field)?;
        let placeholder = fragments.bind(SqlValue::from_json(field, value)?);
        fragments.push(format!("{}={}", quote_ident(column), placeholder));
    }

    let (set_clause, values) = fragments.finish(", ");
    Ok(PartialUpdate { set_clause, values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const COMPANY: ColumnMap = ColumnMap::new(
        &["name", "description", "numEmployees", "logoUrl"],
        &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")],
    );

    const JOB: ColumnMap = ColumnMap::new(&["title", "salary", "equity"], &[]);

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_translates_and_numbers_in_key_order() {
        let data = object(json!({
            "name": "testName",
            "numEmployees": 99,
            "logoUrl": "url"
        }));

        let update = build_partial_update(&data, &COMPANY).unwrap();

        assert_eq!(
            update.set_clause,
            "\"name\"=$1, \"num_employees\"=$2, \"logo_url\"=$3"
        );
        assert_eq!(
            update.values,
            vec![
                SqlValue::Text("testName".to_string()),
                SqlValue::Int(99),
                SqlValue::Text("url".to_string()),
            ]
        );
        assert_eq!(update.next_placeholder(), "$4");
    }

    #[test]
    fn test_order_follows_input_not_allow_list() {
        let data = object(json!({ "logoUrl": "url", "name": "n" }));

        let update = build_partial_update(&data, &COMPANY).unwrap();

        assert_eq!(update.set_clause, "\"logo_url\"=$1, \"name\"=$2");
        assert_eq!(
            update.values,
            vec![SqlValue::from("url"), SqlValue::from("n")]
        );
    }

    #[test]
    fn test_untranslated_key_kept_verbatim() {
        let data = object(json!({ "description": "d" }));
        let update = build_partial_update(&data, &COMPANY).unwrap();
        assert_eq!(update.set_clause, "\"description\"=$1");
    }

    #[test]
    fn test_empty_fields_is_no_data() {
        assert_eq!(
            build_partial_update(&Map::new(), &COMPANY),
            Err(SqlError::NoData)
        );
        assert_eq!(build_partial_update(&Map::new(), &JOB), Err(SqlError::NoData));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let data = object(json!({ "title": "t", "\"id\"=0 --": 1 }));
        assert_eq!(
            build_partial_update(&data, &JOB),
            Err(SqlError::UnknownField("\"id\"=0 --".to_string()))
        );
    }

    #[test]
    fn test_storage_name_is_not_a_logical_field() {
        let data = object(json!({ "num_employees": 3 }));
        assert_eq!(
            build_partial_update(&data, &COMPANY),
            Err(SqlError::UnknownField("num_employees".to_string()))
        );
    }

    #[test]
    fn test_alignment_for_every_size() {
        let keys = ["title", "salary", "equity"];
        for k in 1..=keys.len() {
            let mut data = Map::new();
            for (i, key) in keys.iter().take(k).enumerate() {
                data.insert(key.to_string(), json!(i as i64 * 10));
            }

            let update = build_partial_update(&data, &JOB).unwrap();
            let fragments: Vec<&str> = update.set_clause.split(", ").collect();

            assert_eq!(fragments.len(), k);
            assert_eq!(update.values.len(), k);
            for (i, fragment) in fragments.iter().enumerate() {
                assert_eq!(*fragment, format!("\"{}\"=${}", keys[i], i + 1));
                assert_eq!(update.values[i], SqlValue::Int(i as i64 * 10));
            }
        }
    }

    #[test]
    fn test_null_and_float_values() {
        let data = object(json!({ "salary": null, "equity": 0.25 }));
        let update = build_partial_update(&data, &JOB).unwrap();
        assert_eq!(
            update.values,
            vec![SqlValue::Null, SqlValue::Float(0.25)]
        );
    }

    #[test]
    fn test_container_value_rejected() {
        let data = object(json!({ "title": ["a", "b"] }));
        assert_eq!(
            build_partial_update(&data, &JOB),
            Err(SqlError::UnsupportedValue {
                field: "title".to_string()
            })
        );
    }
}
