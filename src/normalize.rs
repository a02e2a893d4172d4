/// Replace every run of non-ASCII characters with a single space.
///
/// ASCII control characters (newlines, tabs, ...) also become spaces, so the
/// result only contains printable ASCII. Used right before text reaches the
/// PDF renderer, whose standard fonts only cover that range.
pub fn to_printable_ascii(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_ascii() {
            in_run = false;
            out.push(if c.is_ascii_control() { ' ' } else { c });
        } else if !in_run {
            in_run = true;
            out.push(' ');
        }
    }
    out
}
