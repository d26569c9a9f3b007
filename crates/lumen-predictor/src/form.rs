//! Prediction form: text buffers the inputs edit, and their coercion into
//! [`Features`].

use crate::api::Features;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Parsed as a number; anything unparseable is 0.
    Number,
    /// Non-zero number is 1, everything else 0.
    Flag,
    /// `F` (any case) or `M`.
    Sex,
    /// Free text; empty means `standard_fmd`.
    Regimen,
}

impl FieldKind {
    #[inline]
    pub fn numeric_input(self) -> bool {
        matches!(self, FieldKind::Number | FieldKind::Flag)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: &'static str,
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind, default: &'static str) -> Field {
    Field { key, label, kind, default }
}

pub const FIELD_COUNT: usize = 9;

pub const FIELDS: [Field; FIELD_COUNT] = [
    field("adherence_pct", "adherence_pct", FieldKind::Number, "90"),
    field("age_years", "age_years", FieldKind::Number, "40"),
    field("bmi", "bmi", FieldKind::Number, "22"),
    field("fmd_regimen_type", "fmd_regimen_type", FieldKind::Regimen, "standard_fmd"),
    field("hba1c", "hba1c", FieldKind::Number, "5.6"),
    field("meds_diabetes", "meds_diabetes (0/1)", FieldKind::Flag, "0"),
    field("n_cycles", "n_cycles", FieldKind::Number, "4"),
    field("sex", "sex (\"M\" or \"F\")", FieldKind::Sex, "M"),
    field("weight_kg", "weight_kg", FieldKind::Number, "70"),
];

const DEFAULT_REGIMEN: &str = "standard_fmd";

/// Lenient number parse: surrounding space ignored, unparseable or
/// non-finite input is 0, and so is negative zero.
pub fn coerce_number(s: &str) -> f64 {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v != 0.0 => v,
        _ => 0.0,
    }
}

pub fn coerce_flag(s: &str) -> u8 {
    u8::from(coerce_number(s) != 0.0)
}

pub fn coerce_sex(s: &str) -> &'static str {
    if s.eq_ignore_ascii_case("f") { "F" } else { "M" }
}

pub fn coerce_regimen(s: &str) -> &str {
    if s.is_empty() { DEFAULT_REGIMEN } else { s }
}

/// Text typed into each field, indexed like [`FIELDS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictForm {
    values: [String; FIELD_COUNT],
}

impl Default for PredictForm {
    fn default() -> Self {
        Self { values: FIELDS.map(|f| f.default.to_string()) }
    }
}

impl PredictForm {
    #[inline]
    pub fn value(&self, index: usize) -> &str {
        self.values.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, index: usize, value: String) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
    }

    pub fn features(&self) -> Features {
        let num = |i: usize| coerce_number(self.value(i));
        Features {
            adherence_pct: num(0),
            age_years: num(1),
            bmi: num(2),
            fmd_regimen_type: coerce_regimen(self.value(3)).to_string(),
            hba1c: num(4),
            meds_diabetes: coerce_flag(self.value(5)),
            n_cycles: num(6),
            sex: coerce_sex(self.value(7)).to_string(),
            weight_kg: num(8),
        }
    }

    /// `[key, coerced value]` per field, for the mirror table.
    pub fn rows(&self) -> Vec<[String; 2]> {
        let f = self.features();
        let values = [
            f.adherence_pct.to_string(),
            f.age_years.to_string(),
            f.bmi.to_string(),
            f.fmd_regimen_type,
            f.hba1c.to_string(),
            f.meds_diabetes.to_string(),
            f.n_cycles.to_string(),
            f.sex,
            f.weight_kg.to_string(),
        ];
        FIELDS.iter().zip(values).map(|(field, v)| [field.key.to_string(), v]).collect()
    }
}
