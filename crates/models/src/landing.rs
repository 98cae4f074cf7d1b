use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub cta_label: String,
    #[serde(default)]
    pub cta_href: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LandingSection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Plain strings or small objects (label, icon, link), rendered as given.
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Marketing copy for the landing page; a singleton overwritten wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LandingPage {
    pub hero: Hero,
    #[serde(default)]
    pub sections: Vec<LandingSection>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LandingPage {
    pub fn validate(&self) -> Result<(), crate::ModelError> {
        if self.hero.title.trim().is_empty() {
            return Err(crate::ModelError::required("hero.title"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_copy_keeps_unknown_fields_and_object_items() {
        let raw = json!({
            "hero": {"title": "T", "image": "/img/hero.png"},
            "sections": [{"id": "s", "title": "S", "variant": "dark", "items": ["plain", {"label": "x", "icon": "star"}]}]
        });
        let page: LandingPage = serde_json::from_value(raw).unwrap();
        assert!(page.validate().is_ok());
        assert_eq!(page.hero.extra.get("image"), Some(&json!("/img/hero.png")));
        assert_eq!(page.sections[0].items[1]["label"], "x");

        let back = serde_json::to_value(&page).unwrap();
        assert_eq!(back["hero"]["image"], "/img/hero.png");
        assert_eq!(back["sections"][0]["variant"], "dark");
        assert_eq!(back["sections"][0]["items"], json!(["plain", {"label": "x", "icon": "star"}]));
    }

    #[test]
    fn hero_title_is_required() {
        let page: LandingPage = serde_json::from_value(json!({"hero": {"title": " "}})).unwrap();
        assert!(page.validate().is_err());
    }
}
