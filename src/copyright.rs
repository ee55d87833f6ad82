//! Copyright-attribution text generation.
//!
//! Turns the free-text author and copyright fields from `Planning Center`
//! into the normalized three-line attribution block printed in bulletins.
//! The output is copy-pasted into external documents, so the punctuation
//! here is load-bearing.

use crate::planning_center::{PlanItem, Song};

/// Fixed license-attribution trailer appended to every block.
const CCLI_TRAILER: &str = "Used by permission. CCLI Streaming License 1564484.";

/// Derive the "Words by / Music by" credit from a free-text author field.
///
/// Three or more comma-separated names credit the first two with words and
/// the third with music. Otherwise the field splits on the literal token
/// `" and "`: a single name gets a combined credit, two names split into
/// words and music.
fn author_line(author: &str) -> String {
    let comma_parts: Vec<&str> = author.split(',').map(str::trim).collect();
    if comma_parts.len() >= 3 {
        return format!(
            "Words by {} and {}. Music by {}",
            comma_parts[0], comma_parts[1], comma_parts[2]
        );
    }

    let parts: Vec<&str> = author.split(" and ").map(str::trim).collect();
    if parts.len() == 1 {
        let author = if parts[0].is_empty() { "Unknown" } else { parts[0] };
        format!("Words and Music by {author}")
    } else {
        let words = if parts[0].is_empty() { "Unknown" } else { parts[0] };
        let music = if parts[1].is_empty() { words } else { parts[1] };
        format!("Words by {words}. Music by {music}")
    }
}

/// Normalize the copyright statement: trailing period, `© ` prefix for
/// anything that is not public domain, and the administrator suffix.
fn copyright_line(copyright: &str, admin: Option<&str>) -> String {
    let mut line = copyright.trim().to_string();
    if !line.ends_with('.') {
        line.push('.');
    }

    if line.to_lowercase() != "public domain." {
        line = format!("© {line}");
    }

    if let Some(admin) = admin {
        if !admin.trim().is_empty() {
            line.push_str(&format!(" Admin. by {admin}"));
        }
    }

    if !line.ends_with('.') {
        line.push('.');
    }

    line
}

/// Format the attribution block for one song.
///
/// The result is exactly three lines: quoted title with the author credit,
/// the normalized copyright line, and the license trailer.
#[must_use]
pub fn format_copyright(title: &str, author: &str, copyright: &str, admin: Option<&str>) -> String {
    format!(
        "\"{title}\" {}.\n{}\n{CCLI_TRAILER}",
        author_line(author),
        copyright_line(copyright, admin)
    )
}

/// Attribution blocks for every song item in a plan, in service order.
///
/// Items join to songs by exact title; the first matching included song wins.
/// Items without a matching song are skipped. Blocks are separated by a
/// blank line.
#[must_use]
pub fn plan_copyright_text(items: &[PlanItem], songs: &[Song]) -> String {
    let mut song_items: Vec<&PlanItem> = items.iter().filter(|item| item.is_song()).collect();
    song_items.sort_by_key(|item| item.sequence);

    song_items.iter()
        .filter_map(|item| songs.iter().find(|song| song.title == item.title))
        .map(|song| format_copyright(&song.title, &song.author, &song.copyright, song.admin.as_deref()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn single_author_gets_combined_credit() {
        assert_eq!(author_line("Bob Smith"), "Words and Music by Bob Smith");
    }

    #[test]
    fn two_authors_split_words_and_music() {
        assert_eq!(
            author_line("Bob Smith and Jane Doe"),
            "Words by Bob Smith. Music by Jane Doe"
        );
    }

    #[test]
    fn three_comma_authors_pair_the_first_two() {
        assert_eq!(author_line("A, B, C"), "Words by A and B. Music by C");
    }

    #[test]
    fn empty_author_falls_back_to_unknown() {
        assert_eq!(author_line(""), "Words and Music by Unknown");
    }

    #[test]
    fn missing_music_credit_repeats_words_author() {
        assert_eq!(
            author_line("Bob Smith and "),
            "Words by Bob Smith. Music by Bob Smith"
        );
    }

    #[test]
    fn public_domain_has_no_symbol() {
        assert_eq!(copyright_line("Public Domain", None), "Public Domain.");
        assert_eq!(copyright_line("public domain", None), "public domain.");
    }

    #[test]
    fn owned_copyright_is_prefixed() {
        assert_eq!(copyright_line("1985 ABC Music", None), "© 1985 ABC Music.");
    }

    #[test]
    fn existing_period_is_not_doubled() {
        assert_eq!(copyright_line("1985 ABC Music.", None), "© 1985 ABC Music.");
    }

    #[test]
    fn admin_is_appended_with_final_period() {
        assert_eq!(
            copyright_line("1985 ABC Music", Some("XYZ Admin")),
            "© 1985 ABC Music. Admin. by XYZ Admin."
        );
    }

    #[test]
    fn blank_admin_is_ignored() {
        assert_eq!(copyright_line("1985 ABC Music", Some("  ")), "© 1985 ABC Music.");
    }

    #[test]
    fn block_has_exact_three_line_shape() {
        let block = format_copyright(
            "Amazing Grace",
            "John Newton",
            "Public Domain",
            None,
        );
        assert_eq!(
            block,
            "\"Amazing Grace\" Words and Music by John Newton.\n\
             Public Domain.\n\
             Used by permission. CCLI Streaming License 1564484."
        );
    }

    #[test]
    fn formatting_is_idempotent_per_input() {
        let first = format_copyright("T", "A and B", "2001 Label", Some("Admin Co"));
        let second = format_copyright("T", "A and B", "2001 Label", Some("Admin Co"));
        assert_eq!(first, second);
    }

    fn item(id: &str, title: &str, item_type: &str, sequence: i64) -> PlanItem {
        PlanItem {
            id: id.to_string(),
            title: title.to_string(),
            item_type: item_type.to_string(),
            sequence,
            service_position: "during".to_string(),
            key_name: None,
            length: 0,
            description: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn song(title: &str, author: &str, copyright: &str) -> Song {
        Song {
            id: "s".to_string(),
            title: title.to_string(),
            author: author.to_string(),
            admin: None,
            ccli_number: 0,
            copyright: copyright.to_string(),
            notes: String::new(),
            themes: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
            planning_center_url: String::new(),
        }
    }

    #[test]
    fn plan_blocks_follow_sequence_and_skip_unmatched() {
        let items = vec![
            item("3", "Second Song", "song", 5),
            item("1", "Announcements", "header", 1),
            item("2", "First Song", "song", 2),
            item("4", "No Such Song", "song", 7),
        ];
        let songs = vec![
            song("Second Song", "B Author", "2001 Label"),
            song("First Song", "A Author", "Public Domain"),
        ];

        let text = plan_copyright_text(&items, &songs);
        let blocks: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("\"First Song\""));
        assert!(blocks[1].starts_with("\"Second Song\""));
    }

    #[test]
    fn duplicate_song_titles_use_first_api_match() {
        let items = vec![item("1", "Doubled", "song", 1)];
        let songs = vec![
            song("Doubled", "First Author", "Public Domain"),
            song("Doubled", "Second Author", "2020 Label"),
        ];
        let text = plan_copyright_text(&items, &songs);
        assert!(text.contains("First Author"));
        assert!(!text.contains("Second Author"));
    }
}
