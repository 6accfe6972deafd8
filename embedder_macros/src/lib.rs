//! Procedural macro implementation for the `embedder` crate. Do not use directly.
use std::{env, fs, path::PathBuf};

use convert_case::{Case, Casing};
use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{Ident, LitStr, Token, parse_macro_input, punctuated::Punctuated};

/// Header line the build script writes when a container has a namespace.
const NAMESPACE_MARKER: &str = "// namespace: ";

/// Includes container modules generated by the `embedder` build script.
///
/// This macro takes one or more string literals: either the container name given to
/// `embedder::build::Config::new` (e.g. `"Assets"`), or the file name of the generated
/// module inside `OUT_DIR` when it ends in `.rs`.
///
/// It expands to `include!` of each generated file, wrapped in the namespace modules the
/// build script recorded for it. Containers that share a namespace must be listed in the
/// same invocation so that they end up in one module:
///
/// ```ignore
/// embedder::include_embedded!("Assets", "Icons"); // both in `demo`
/// ```
///
/// # Build Dependencies
///
/// This macro requires a `build.rs` script for the consuming crate that uses
/// `embedder::build::Config` to generate the modules.
///
/// # Errors
///
/// This macro will cause a compilation failure if:
/// - The build script has not been run.
/// - The build script did not generate one of the requested modules.
/// - A recorded namespace segment is not a valid module name.
#[proc_macro]
pub fn include_embedded(input: TokenStream) -> TokenStream {
    let names = parse_macro_input!(input with Punctuated::<LitStr, Token![,]>::parse_terminated);
    get_tokens(&names)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn get_tokens(names: &Punctuated<LitStr, Token![,]>) -> syn::Result<TokenStream2> {
    let Ok(out_dir) = env::var("OUT_DIR") else {
        return Err(syn::Error::new(
            Span::call_site(),
            "include_embedded: build script has not run. This is expected during analysis (e.g., by rust-analyzer).",
        ));
    };

    let mut root = ModuleTree::default();
    for lit_str in names {
        let path = PathBuf::from(&out_dir).join(file_name(&lit_str.value()));
        let Ok(source) = fs::read_to_string(&path) else {
            let msg = format!(
                "include_embedded: generated module for '{}' not found\nexpected at: {}",
                lit_str.value(),
                path.display()
            );
            return Err(syn::Error::new(lit_str.span(), msg));
        };

        let modules = namespace(&source)
            .map(|segment| {
                syn::parse_str::<Ident>(segment).map_err(|_| {
                    let msg =
                        format!("include_embedded: '{segment}' is not a valid module name");
                    syn::Error::new(lit_str.span(), msg)
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        root.insert(&modules, path.display().to_string());
    }

    Ok(root.to_tokens())
}

/// Maps a container name to its generated file name, the same way the build script does.
fn file_name(name: &str) -> String {
    if name.ends_with(".rs") {
        name.to_owned()
    } else {
        format!("{}.rs", name.to_case(Case::Snake))
    }
}

/// Module names from the namespace line in a generated file's header comment.
fn namespace(source: &str) -> impl Iterator<Item = &str> {
    source
        .lines()
        .take_while(|line| line.starts_with("//"))
        .find_map(|line| line.strip_prefix(NAMESPACE_MARKER))
        .into_iter()
        .flat_map(|path| path.split("::"))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}

/// Included files grouped by namespace, in first-seen order.
#[derive(Default)]
struct ModuleTree {
    files: Vec<String>,
    children: Vec<(Ident, ModuleTree)>,
}

impl ModuleTree {
    fn insert(&mut self, modules: &[Ident], file: String) {
        let Some((head, rest)) = modules.split_first() else {
            self.files.push(file);
            return;
        };
        let index = match self.children.iter().position(|(name, _)| name == head) {
            Some(index) => index,
            None => {
                self.children.push((head.clone(), Self::default()));
                self.children.len() - 1
            }
        };
        self.children[index].1.insert(rest, file);
    }

    fn to_tokens(&self) -> TokenStream2 {
        let files = &self.files;
        let children = self.children.iter().map(|(name, tree)| {
            let body = tree.to_tokens();
            quote! {
                #[allow(non_snake_case)]
                pub mod #name {
                    #body
                }
            }
        });
        quote! {
            #(include!(#files);)*
            #(#children)*
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Ident {
        Ident::new(name, Span::call_site())
    }

    #[test]
    fn container_names_map_to_snake_case_files() {
        assert_eq!(file_name("Assets"), "assets.rs");
        assert_eq!(file_name("UiIcons"), "ui_icons.rs");
        assert_eq!(file_name("custom/out.rs"), "custom/out.rs");
    }

    #[test]
    fn namespace_is_read_from_the_header() {
        let source = "// @generated by embedder 0.1.0. DO NOT EDIT.\n\
                      // namespace: ui::icons\n\
                      //\n\
                      \n\
                      pub mod Small {}\n";
        assert_eq!(namespace(source).collect::<Vec<_>>(), ["ui", "icons"]);
    }

    #[test]
    fn missing_namespace_line_means_root() {
        let source = "// @generated by embedder 0.1.0. DO NOT EDIT.\n\n\
                      // namespace: not::header\n";
        assert_eq!(namespace(source).count(), 0);
    }

    #[test]
    fn shared_namespaces_are_merged() {
        let mut root = ModuleTree::default();
        root.insert(&[ident("demo")], "a.rs".to_owned());
        root.insert(&[], "plain.rs".to_owned());
        root.insert(&[ident("demo")], "b.rs".to_owned());
        root.insert(&[ident("demo"), ident("deep")], "c.rs".to_owned());

        let expected = quote! {
            include!("plain.rs");
            #[allow(non_snake_case)]
            pub mod demo {
                include!("a.rs");
                include!("b.rs");
                #[allow(non_snake_case)]
                pub mod deep {
                    include!("c.rs");
                }
            }
        };
        assert_eq!(root.to_tokens().to_string(), expected.to_string());
    }
}
