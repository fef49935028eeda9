use serde::{Deserialize, Serialize};

/// Name shown when neither the server nor the OCR hint produced one
pub const NAME_PLACEHOLDER: &str = "No name information available";

const INGREDIENTS_PLACEHOLDER: &str = "No ingredient information available.";
const SIDE_EFFECTS_PLACEHOLDER: &str = "No side effect information available.";
const EFFICACY_PENDING: &str =
    "Efficacy information will be provided once the regulatory drug database is connected.";
const DOSAGE_PENDING: &str =
    "Dosage information will be provided once the regulatory drug database is connected.";
const CONTRAINDICATIONS_PENDING: &str =
    "Contraindication information is planned for a future update.";
const INTERACTIONS_PENDING: &str =
    "Interaction information for other medications is planned for a future update.";

/// Single active ingredient as reported by the recognition server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub name: String,
    pub amount_mg: Option<f64>,
}

/// Structured payload from `POST /api/v1/pill/recognize`
///
/// Field names match the wire format. `pill_name` is always present but may
/// be empty; everything else is nullable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecognitionResult {
    pub pill_name: String,
    pub pill_code: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub confidence: Option<f64>,
    pub color: Option<String>,
    pub shape: Option<String>,
    pub imprint: Option<String>,
    pub warnings: Option<Vec<String>>,
}

/// View model for the result screen, shared by the camera and search paths
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PillDetail {
    pub name: String,
    pub efficacy: String,
    pub dosage: String,
    pub ingredients: String,
    pub side_effects: String,
    pub contraindications: String,
    pub interactions: String,
}

fn format_amount(mg: f64) -> String {
    if mg.fract() == 0.0 {
        format!("{}", mg as i64)
    } else {
        format!("{}", mg)
    }
}

fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

impl RecognitionResult {
    /// Map the server payload into the display model.
    ///
    /// Display name priority: server `pill_name`, then the OCR hint, then a
    /// literal placeholder. The hint is advisory only; no other field uses it.
    pub fn to_detail(&self, hint: Option<&str>) -> PillDetail {
        let name = non_blank(&self.pill_name)
            .or(hint.and_then(non_blank))
            .unwrap_or(NAME_PLACEHOLDER)
            .to_string();

        let ingredients = self
            .ingredients
            .as_deref()
            .filter(|list| !list.is_empty())
            .map(|list| {
                list.iter()
                    .map(|ing| match ing.amount_mg {
                        Some(mg) => format!("{} {}mg", ing.name, format_amount(mg)),
                        None => ing.name.clone(),
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_else(|| INGREDIENTS_PLACEHOLDER.to_string());

        let side_effects = self
            .warnings
            .as_deref()
            .filter(|list| !list.is_empty())
            .map(|list| list.join("\n"))
            .unwrap_or_else(|| SIDE_EFFECTS_PLACEHOLDER.to_string());

        PillDetail {
            name,
            efficacy: EFFICACY_PENDING.to_string(),
            dosage: DOSAGE_PENDING.to_string(),
            ingredients,
            side_effects,
            contraindications: CONTRAINDICATIONS_PENDING.to_string(),
            interactions: INTERACTIONS_PENDING.to_string(),
        }
    }
}

impl PillDetail {
    /// Canned detail for the free-text search path.
    ///
    /// The search tab ships sample content until the drug database search is
    /// wired up; only the name reflects user input.
    pub fn from_query(query: &str) -> Self {
        let name = non_blank(query).unwrap_or("Sample analgesic").to_string();
        PillDetail {
            name,
            efficacy: "Over-the-counter relief of temporary pain such as headache, \
                       toothache, and muscle ache. (sample data)"
                .to_string(),
            dosage: "Adults: one tablet per dose, up to three times daily after meals \
                     with plenty of water. (sample data)"
                .to_string(),
            ingredients: "Acetaminophen 160mg\nAnhydrous caffeine 25mg\nEthenzamide 60mg \
                          (sample data)"
                .to_string(),
            side_effects: "Heartburn, nausea, headache, or dizziness may occur. Stop \
                           taking and consult a doctor if symptoms are severe. (sample data)"
                .to_string(),
            contraindications: "Avoid with severe liver disease, gastric ulcers, or a \
                                history of allergy to the ingredients. (sample data)"
                .to_string(),
            interactions: "Taking together with other analgesics (e.g. ibuprofen, \
                           naproxen) risks overdose. (sample data)"
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(pill_name: &str) -> RecognitionResult {
        RecognitionResult {
            pill_name: pill_name.to_string(),
            pill_code: None,
            ingredients: None,
            confidence: None,
            color: None,
            shape: None,
            imprint: None,
            warnings: None,
        }
    }

    #[test]
    fn test_name_prefers_server_value() {
        let detail = result_with("Acetaminophen 650mg").to_detail(Some("ABC"));
        assert_eq!(detail.name, "Acetaminophen 650mg");
    }

    #[test]
    fn test_name_falls_back_to_hint() {
        let detail = result_with("").to_detail(Some("ABC"));
        assert_eq!(detail.name, "ABC");
    }

    #[test]
    fn test_name_falls_back_to_placeholder() {
        let detail = result_with("").to_detail(None);
        assert_eq!(detail.name, NAME_PLACEHOLDER);

        // A whitespace-only hint counts as blank
        let detail = result_with("  ").to_detail(Some("   "));
        assert_eq!(detail.name, NAME_PLACEHOLDER);
    }

    #[test]
    fn test_ingredients_and_warnings_formatting() {
        let mut result = result_with("Acetaminophen");
        result.ingredients = Some(vec![Ingredient {
            name: "Acetaminophen".to_string(),
            amount_mg: Some(160.0),
        }]);
        result.warnings = Some(vec!["drowsiness".to_string()]);

        let detail = result.to_detail(None);
        assert_eq!(detail.ingredients, "Acetaminophen 160mg");
        assert_eq!(detail.side_effects, "drowsiness");
    }

    #[test]
    fn test_multiple_ingredients_join_with_newlines() {
        let mut result = result_with("x");
        result.ingredients = Some(vec![
            Ingredient {
                name: "Acetaminophen".to_string(),
                amount_mg: Some(650.0),
            },
            Ingredient {
                name: "Caffeine".to_string(),
                amount_mg: Some(12.5),
            },
            Ingredient {
                name: "Starch".to_string(),
                amount_mg: None,
            },
        ]);

        let detail = result.to_detail(None);
        assert_eq!(
            detail.ingredients,
            "Acetaminophen 650mg\nCaffeine 12.5mg\nStarch"
        );
    }

    #[test]
    fn test_empty_lists_use_placeholders() {
        let mut result = result_with("x");
        result.ingredients = Some(vec![]);
        result.warnings = Some(vec![]);

        let detail = result.to_detail(None);
        assert_eq!(detail.ingredients, INGREDIENTS_PLACEHOLDER);
        assert_eq!(detail.side_effects, SIDE_EFFECTS_PLACEHOLDER);
    }

    #[test]
    fn test_wire_payload_parsing() {
        let json = r#"{
            "pill_name": "Acetaminophen 650mg",
            "pill_code": "198804008",
            "ingredients": [{"name": "Acetaminophen", "amount_mg": 650.0}],
            "confidence": 0.95,
            "color": "white",
            "shape": "oblong",
            "imprint": "APAP 650",
            "warnings": ["Do not take with severe liver disease"]
        }"#;

        let result: RecognitionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.pill_name, "Acetaminophen 650mg");
        assert_eq!(result.confidence, Some(0.95));
        assert_eq!(result.ingredients.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_wire_payload_with_nulls() {
        let json = r#"{
            "pill_name": "",
            "pill_code": null,
            "ingredients": null,
            "confidence": null,
            "color": null,
            "shape": null,
            "imprint": null,
            "warnings": null
        }"#;

        let result: RecognitionResult = serde_json::from_str(json).unwrap();
        assert!(result.pill_name.is_empty());
        assert!(result.ingredients.is_none());
    }

    #[test]
    fn test_query_detail_uses_query_as_name() {
        let detail = PillDetail::from_query("Tylenol");
        assert_eq!(detail.name, "Tylenol");

        let detail = PillDetail::from_query("  ");
        assert_eq!(detail.name, "Sample analgesic");
    }
}
