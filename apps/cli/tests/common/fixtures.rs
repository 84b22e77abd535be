//! Sample pages in the export format.

/// Title, two sections, three toggles.
pub const VIM_PAGE: &str = "\
# Vim Basics

## Modes

- How to quit

\tpress q

- Enter insert mode

\tpress i

## Motions

### Words

- Next word

    w moves forward
    W skips punctuation

";

/// One toggle whose back holds display and inline math.
pub const MATH_PAGE: &str = "\
# Geometry

- Circle area

\t$$A = \\pi r^2$$ where $r$ is the radius

";

/// One toggle referencing an image exported next to the page.
pub const MEDIA_PAGE: &str = "\
# Anatomy

- Heart

\t![Anatomy/Untitled 1.png](Anatomy/Untitled%201.png)

";

/// Generate a page with `num_cards` toggles under one section.
pub fn generated_page(num_cards: usize) -> String {
    let toggles: String = (0..num_cards)
        .map(|i| format!("- Question {}\n\n\tAnswer {}\n\n", i + 1, i + 1))
        .collect();
    format!("# Generated\n\n## Bulk\n\n{toggles}")
}

/// Scratch buffer for a card, as the editor sees it.
pub fn scratch_buffer(front: &str, back: &str, tags: &[&str]) -> String {
    let mut buf = format!("~~~~~Front~~~~~\n{front}\n~~~~~Back~~~~~\n{back}~~~~~Tags~~~~~\n");
    for tag in tags {
        buf.push_str(tag);
        buf.push('\n');
    }
    buf
}
