use crate::core::schema::FieldOption;

/// Selectable values for `address.state`: (code, display name).
pub const STATES: &[(&str, &str)] = &[
    ("CH", "Chihuahua"),
    ("DF", "Distrito Federal"),
    ("NL", "Nuevo Leon"),
    ("SLP", "San Luis Potosi"),
    ("SON", "Sonora"),
    ("TAMPS", "Tamaulipas"),
    ("ZAC", "Zacatecas"),
    ("COAH", "Coahuila"),
    ("GTO", "Guanajuato"),
    ("JAL", "Jalisco"),
    ("MEX", "Mexico"),
    ("MOR", "Morelos"),
    ("NAY", "Nayarit"),
    ("OAX", "Oaxaca"),
    ("PUE", "Puebla"),
    ("QRO", "Queretaro"),
];

pub fn state_name(code: &str) -> Option<&'static str> {
    STATES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, name)| *name)
}

pub fn state_options() -> Vec<FieldOption> {
    STATES
        .iter()
        .map(|(code, name)| FieldOption::new(*code, *name))
        .collect()
}
