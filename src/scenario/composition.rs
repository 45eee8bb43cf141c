use serde::{Deserialize, Serialize};

fn one() -> u32 {
    1
}

/// A measured component of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub name: String,
    /// Mass of a single piece in grams
    pub mass_g: f64,
    /// Pieces per product
    #[serde(default = "one")]
    pub count: u32,
}

impl Part {
    pub fn new(name: impl Into<String>, mass_g: f64) -> Self {
        Self::repeated(name, mass_g, 1)
    }

    pub fn repeated(name: impl Into<String>, mass_g: f64, count: u32) -> Self {
        Self {
            name: name.into(),
            mass_g,
            count,
        }
    }

    /// Mass of all pieces of this part in one product
    pub fn total_mass(&self) -> f64 {
        self.mass_g * f64::from(self.count)
    }
}

/// Bill of materials of one product unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductComposition {
    pub name: String,
    pub parts: Vec<Part>,
}

impl ProductComposition {
    /// Blood glucose meter disassembled in the reference robotic cell
    pub fn glucose_meter() -> Self {
        Self {
            name: "glucose_meter".to_string(),
            parts: vec![
                Part::new("front_case", 14.4),
                Part::new("back_case", 17.2),
                Part::new("pcb", 17.8),
                Part::repeated("screw", 0.2, 5),
                Part::new("spring", 0.1),
                Part::new("button_and_clip", 1.6),
                Part::new("test_strip_port", 1.0),
                Part::new("screen", 8.4),
                Part::new("usb_port_cap", 0.3),
            ],
        }
    }

    pub fn part(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|part| part.name == name)
    }

    /// Mass of all pieces of the named part, if present
    pub fn part_mass(&self, name: &str) -> Option<f64> {
        self.part(name).map(Part::total_mass)
    }

    /// Mass of one product unit in grams
    pub fn total_mass(&self) -> f64 {
        self.parts.iter().map(Part::total_mass).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glucose_meter_mass() {
        let product = ProductComposition::glucose_meter();
        assert!((product.total_mass() - 61.8).abs() < 1e-9);
        assert!((product.part_mass("screw").unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(product.part_mass("battery"), None);
    }

    #[test]
    fn test_count_defaults_to_one() {
        let part: Part = serde_json::from_str(r#"{ "name": "lid", "mass_g": 2.5 }"#).unwrap();
        assert_eq!(part.count, 1);
        assert_eq!(part.total_mass(), 2.5);
    }
}
