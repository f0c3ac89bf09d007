/// Convert `snake_case` or lowercase names into `CamelCase`.
///
/// Used both to resolve called entity names (`album` -> `Album`) and to key
/// container elements when flattening XML (`lfm` -> `Lfm`).
pub fn camelize(name: &str) -> String {
    name.split('_')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camelize() {
        assert_eq!(camelize("album"), "Album");
        assert_eq!(camelize("lfm"), "Lfm");
        assert_eq!(camelize("similar_artists"), "SimilarArtists");
        assert_eq!(camelize("Tasteometer"), "Tasteometer");
        assert_eq!(camelize("topTracks"), "TopTracks");
        assert_eq!(camelize(""), "");
    }
}
