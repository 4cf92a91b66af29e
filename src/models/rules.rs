/// A country-specific deviation from the generic MRZ field layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldQuirk {
    /// Keep only the first N characters of the normalized personal number.
    TruncatePersonalNumber(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryRule {
    pub country_code: &'static str,
    pub quirks: &'static [FieldQuirk],
}

const COUNTRY_RULES: &[CountryRule] = &[
    // Tunisian passports carry extra data after the 8-character personal number.
    CountryRule {
        country_code: "TUN",
        quirks: &[FieldQuirk::TruncatePersonalNumber(8)],
    },
];

/// Lookup table of country quirks keyed by normalized issuing country code.
#[derive(Debug, Clone, Copy)]
pub struct CountryRules {
    countries: &'static [CountryRule],
}

impl Default for CountryRules {
    fn default() -> Self {
        Self::new()
    }
}

impl CountryRules {
    pub fn new() -> Self {
        CountryRules {
            countries: COUNTRY_RULES,
        }
    }

    pub fn get_rule(&self, country_code: &str) -> Option<&CountryRule> {
        self.countries
            .iter()
            .find(|rule| rule.country_code == country_code)
    }

    /// Apply the quirks registered for `country_code` to a normalized personal number.
    pub fn apply_personal_number(
        &self,
        country_code: Option<&str>,
        personal_number: Option<String>,
    ) -> Option<String> {
        let rule = match country_code.and_then(|code| self.get_rule(code)) {
            Some(rule) => rule,
            None => return personal_number,
        };

        rule.quirks
            .iter()
            .fold(personal_number, |value, quirk| match quirk {
                FieldQuirk::TruncatePersonalNumber(len) => {
                    value.map(|v| v.chars().take(*len).collect())
                }
            })
    }
}
