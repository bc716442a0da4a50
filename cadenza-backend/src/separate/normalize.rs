use std::sync::OnceLock;

use cadenza_api::common::stem::Role;
use regex::Regex;

fn model_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"_model_.*").unwrap())
}

fn label_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\((Instrumental|Vocals)\)").unwrap())
}

/// Renames a separator output into the stem taxonomy. The vocal part becomes the soprano.
pub fn normalize(file_name: &str) -> (String, Option<Role>) {
    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => (stem, Some(extension)),
        _ => (file_name, None),
    };

    let stem = model_regex().replace(stem, "");
    let stem = label_regex().replace_all(&stem, "$1").replace("Vocals", "Soprano");

    let role = if stem.contains("Soprano") {
        Some(Role::Soprano)
    } else if stem.contains("Instrumental") {
        Some(Role::Instrumental)
    } else {
        None
    };

    let name = match extension {
        Some(extension) => [stem.as_str(), extension].join("."),
        None => stem,
    };
    (name, role)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(
        "song_KEY_C_BPM_120_(Vocals)_model_bs_roformer_ep_317.wav",
        "song_KEY_C_BPM_120_Soprano.wav",
        Some(Role::Soprano)
    )]
    #[case(
        "song_KEY_C_BPM_120_(Instrumental)_model_bs_roformer_ep_317.wav",
        "song_KEY_C_BPM_120_Instrumental.wav",
        Some(Role::Instrumental)
    )]
    #[case(
        "song_KEY_A#m_BPM_90_Vocals.flac",
        "song_KEY_A#m_BPM_90_Soprano.flac",
        Some(Role::Soprano)
    )]
    #[case("song_(Drums)_model_x.wav", "song_(Drums).wav", None)]
    #[case("song_(Vocals)", "song_Soprano", Some(Role::Soprano))]
    fn test_normalize(#[case] input: &str, #[case] name: &str, #[case] role: Option<Role>) {
        assert_eq!(normalize(input), (name.to_owned(), role));
    }
}
