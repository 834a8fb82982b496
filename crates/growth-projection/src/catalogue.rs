//! Fixed catalogue of the Mexican states.
//!
//! The order of [`STATE_NAMES`] is significant: generated data, projection
//! rows and the default chart selection all follow it.

/// Number of entities in the catalogue.
pub const STATE_COUNT: usize = 32;

/// Number of leading catalogue entries charted when no selection is made.
pub const DEFAULT_SELECTION_SIZE: usize = 5;

/// Embedded map shown alongside the projections.
pub const MAP_EMBED_URL: &str =
    "https://www.google.com/maps/d/embed?mid=1ga6pN3K6aBmrT9Bt37TkjoKERP5PI8E";

/// State names in catalogue order.
pub const STATE_NAMES: [&str; STATE_COUNT] = [
    "Aguascalientes",
    "Baja California",
    "Baja California Sur",
    "Campeche",
    "Chiapas",
    "Chihuahua",
    "Ciudad de México",
    "Coahuila",
    "Colima",
    "Durango",
    "Guanajuato",
    "Guerrero",
    "Hidalgo",
    "Jalisco",
    "México",
    "Michoacán",
    "Morelos",
    "Nayarit",
    "Nuevo León",
    "Oaxaca",
    "Puebla",
    "Querétaro",
    "Quintana Roo",
    "San Luis Potosí",
    "Sinaloa",
    "Sonora",
    "Tabasco",
    "Tamaulipas",
    "Tlaxcala",
    "Veracruz",
    "Yucatán",
    "Zacatecas",
];

/// Returns `true` if `name` is one of the catalogue states.
///
/// Matching is exact, including accents.
///
/// # Examples
///
/// ```
/// use growth_projection::is_catalogue_state;
///
/// assert!(is_catalogue_state("Nuevo León"));
/// assert!(!is_catalogue_state("Nuevo Leon"));
/// ```
#[must_use]
pub fn is_catalogue_state(name: &str) -> bool {
    STATE_NAMES.contains(&name)
}
