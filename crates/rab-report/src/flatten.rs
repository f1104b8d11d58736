//! Nested value flattening.

use serde_json::Value;

/// Walk `data` into (dotted path, leaf) pairs.
///
/// Nulls yield nothing; a non-mapping value yields one pair with the
/// current prefix; a mapping recurses into each key in sorted order with
/// the prefix extended by `.` and the key. The iterator is lazy and
/// finite, and two calls over structurally equal input yield pairs in
/// the same order.
///
/// ```
/// use rab_report::flatten;
/// use serde_json::json;
///
/// let data = json!({"b": {"y": 2, "x": 1}, "a": 0});
/// let pairs: Vec<(String, &serde_json::Value)> = flatten(&data).collect();
/// assert_eq!(pairs[0], ("a".to_string(), &json!(0)));
/// assert_eq!(pairs[1], ("b.x".to_string(), &json!(1)));
/// assert_eq!(pairs[2], ("b.y".to_string(), &json!(2)));
/// ```
pub fn flatten(data: &Value) -> Flatten<'_> {
    Flatten {
        stack: vec![(String::new(), data)],
    }
}

/// Iterator produced by [`flatten`].
#[derive(Debug)]
pub struct Flatten<'a> {
    stack: Vec<(String, &'a Value)>,
}

impl<'a> Iterator for Flatten<'a> {
    type Item = (String, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((prefix, value)) = self.stack.pop() {
            match value {
                Value::Null => continue,
                Value::Object(map) => {
                    let mut keys: Vec<&String> = map.keys().collect();
                    keys.sort();
                    // reversed so pops come out in sorted order
                    for key in keys.into_iter().rev() {
                        let path = if prefix.is_empty() {
                            key.clone()
                        } else {
                            format!("{prefix}.{key}")
                        };
                        self.stack.push((path, &map[key]));
                    }
                }
                leaf => return Some((prefix, leaf)),
            }
        }
        None
    }
}
