//! Map slug to display name table.
//!
//! The game stores an internal track slug; players know the tracks by their
//! menu names. The table is fixed for the supported build.

/// Resolve an internal map slug (already lower-cased) to its display name.
pub fn map_display_name(slug: &str) -> Option<&'static str> {
    let name = match slug {
        "beach_1" => "Пляж",
        "beach_2" => "Кемпинг",
        "beach_3" => "Форт",
        "beach_4" => "Война",
        "country_1" => "Ранчо",
        "country_2" => "Шахта",
        "country_3" => "Деревня",
        "country_4" => "СС-30",
        "urban_1" => "Объект X",
        "urban_2" => "База ПВО",
        _ => return None,
    };
    Some(name)
}
