use crate::provider::FrontEndProvider;
use crate::transform::SchemaResult;

/// Assemble the generated module: the provider's `useForm` import, then a
/// type alias and a form constant per schema.
pub fn render_module(provider: FrontEndProvider, results: &[SchemaResult]) -> String {
    let mut out = String::new();
    out.push_str(provider.use_form_import());
    out.push_str("\n\n");
    for result in results {
        out.push_str(&format!(
            "export type {} = {}\n",
            result.type_name, result.type_expression
        ));
        out.push_str(&format!(
            "export const {} = useForm({} satisfies {});\n\n",
            result.form_name, result.initial_expression, result.type_name
        ));
    }
    out
}
