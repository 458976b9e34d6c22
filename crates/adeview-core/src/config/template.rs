use adeview_model::Env;

/// Expands `$NAME` and `${NAME}` references from `env`.
///
/// References to unset variables, a `$` not followed by a name, and an
/// unterminated `${` are copied verbatim.
pub fn expand(template: &str, env: &Env) -> String {
    shellexpand::env_with_context_no_errors(template, |name| env.get(name)).into_owned()
}
