/// Rewrite a BibTeX `author` value as Harvard-style names.
///
/// Authors are separated by the literal ` and `. Each becomes `Last, I.`: a name with a comma is
/// read as `Last, First`, a name with spaces as `First ... Last`. A single bare word (an
/// organisation, or a mononym like `Plato`) passes through untouched. The list is joined with
/// commas and a final ` and `.
pub fn format_authors(raw: &str) -> String {
    let mut names: Vec<String> = raw.split(" and ").map(format_author).collect();

    match names.len() {
        0 => String::new(),
        1 => names.remove(0),
        _ => {
            let last = names.pop().unwrap_or_default();
            format!("{} and {}", names.join(", "), last)
        }
    }
}

fn format_author(author: &str) -> String {
    if let Some((last, first)) = author.split_once(',') {
        return format!("{}, {}.", last.trim(), initial(first.trim()));
    }

    let parts: Vec<&str> = author.split(' ').filter(|p| !p.is_empty()).collect();
    match parts.as_slice() {
        [first, .., last] => format!("{}, {}.", last, initial(first)),
        _ => author.trim().to_string(),
    }
}

fn initial(name: &str) -> &str {
    name.char_indices()
        .nth(1)
        .map_or(name, |(idx, _)| &name[..idx])
}
