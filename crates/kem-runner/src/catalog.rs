//! Example programs offered by the playground.

use serde::Serialize;
use std::collections::BTreeMap;

/// Program loaded into the editor when the playground opens or resets.
pub const DEFAULT_PROGRAM: &str = "kem bhai
aa naam che \"Sanket\"
bhai bol \"kem cho, \" + naam + \"!\"
aavjo bhai";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Example {
    /// Lookup key; also the key of the JSON catalog, so not repeated there.
    #[serde(skip)]
    pub key: &'static str,
    pub name: &'static str,
    pub code: &'static str,
    /// Sample input for `bapu tame bolo`.
    pub input: &'static str,
}

pub const EXAMPLES: &[Example] = &[
    Example {
        key: "hello",
        name: "Hello World",
        code: "kem bhai
aa naam che \"World\"
bhai bol \"Hello, \" + naam + \"!\"
aavjo bhai",
        input: "",
    },
    Example {
        key: "variables",
        name: "Variables",
        code: "kem bhai
aa number che 42
aa message che \"The answer is: \" + number
bhai bol message
aavjo bhai",
        input: "",
    },
    Example {
        key: "math",
        name: "Simple Math",
        code: "kem bhai
aa a che 10
aa b che 5
aa sum che a + b
bhai bol \"Sum: \" + sum
aavjo bhai",
        input: "",
    },
    Example {
        key: "input",
        name: "Greeting With Input",
        code: "kem bhai
aa naam che bapu tame bolo
bhai bol \"kem cho, \" + naam + \"!\"
aavjo bhai",
        input: "Sanket",
    },
];

pub fn find(key: &str) -> Option<&'static Example> {
    EXAMPLES.iter().find(|example| example.key == key)
}

/// The catalog as a JSON object keyed by example key.
pub fn catalog_json() -> serde_json::Result<String> {
    let by_key: BTreeMap<&str, &Example> = EXAMPLES.iter().map(|e| (e.key, e)).collect();
    serde_json::to_string(&by_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<&str> = EXAMPLES.iter().map(|e| e.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), EXAMPLES.len());
    }

    #[test]
    fn test_find() {
        assert_eq!(find("math").map(|e| e.name), Some("Simple Math"));
        assert!(find("loop").is_none());
    }

    #[test]
    fn test_catalog_json_shape() {
        let json: serde_json::Value = serde_json::from_str(&catalog_json().unwrap()).unwrap();
        assert_eq!(json["hello"]["name"], "Hello World");
        assert_eq!(json["input"]["input"], "Sanket");
        assert!(json["hello"].get("key").is_none());
    }
}
