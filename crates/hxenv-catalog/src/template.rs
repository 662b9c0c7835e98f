/// Substitutes `{name}` placeholders in a URL template. Placeholders with
/// no matching variable are left untouched.
#[must_use]
pub fn substitute(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}
