use arbitrary::Arbitrary;

/// A line of a `.stew` file.
#[derive(Arbitrary, Debug)]
pub enum StewLine<'a> {
    Section(&'a str),
    Key(&'a str),
    Comment(&'a str),
    Tags(&'a str),
    Singular(&'a str, &'a str),
    Plural(&'a str, u8, &'a str),
    Blank,
}

/// Generate the source of a random `.stew` file for fuzzing.
///
/// Newlines are removed from the parts so every item is one line.
pub fn create_source(lines: &[StewLine<'_>]) -> String {
    let clean = |text: &str| text.replace(['\n', '\r'], " ");
    let mut source = String::new();
    for line in lines {
        let line = match line {
            StewLine::Section(name) => format!("[[{}]]", clean(name)),
            StewLine::Key(key) => format!("[{}]", clean(key)),
            StewLine::Comment(text) => format!("comment = {}", clean(text)),
            StewLine::Tags(text) => format!("tags = {}", clean(text)),
            StewLine::Singular(lang, text) => format!("{} = {}", clean(lang), clean(text)),
            StewLine::Plural(lang, idx, text) => {
                format!("{}[{idx}] = {}", clean(lang), clean(text))
            }
            StewLine::Blank => String::new(),
        };
        source.push_str(&line);
        source.push('\n');
    }
    source
}
