use quote::quote;
use std::{env, fs, path::Path};

#[path = "src/shape.rs"]
mod shape;

use shape::Shape;

// `#` occupied, `.` empty, blank padding rows are dropped.
const CLASSIC_TXT: &str = r"
#####|#...|##..|##|.#..|###|#.#|#..|#..|.#.|##.|.##
     |####|.###|##|####|.#.|###|#..|##.|###|.#.|##.
     |    |    |#.|    |.#.|   |###|.##|.#.|.##|.#.
";
const CLASSIC_NAMES: [&str; 12] = ["I", "L", "N", "P", "Y", "T", "U", "V", "W", "X", "Z", "F"];

// Mirror images of the asymmetric pieces, except Z: the extended set is
// capped at 17 templates.
const MIRRORED_TXT: &str = r"
...#|..##|##|..#.|##.
####|###.|##|####|.##
    |    |.#|    |.#.
";
const MIRRORED_NAMES: [&str; 5] = ["L'", "N'", "P'", "Y'", "F'"];

struct Template {
    name: &'static str,
    shape: Shape,
}

struct TemplatesExt {
    templates: Vec<Template>,
}

impl quote::ToTokens for TemplatesExt {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        let templates: Vec<_> = self
            .templates
            .iter()
            .map(|t| {
                let name = t.name;
                let data = t.shape.data;
                let wh = t.shape.wh;
                quote! {
                    Template { name: #name, shape: Shape { data: #data, wh: #wh } }
                }
            })
            .collect();

        let templates = quote! {
            #(#templates),*
        };
        tokens.extend(templates);
    }
}

fn split_shapes_txt(text: &str) -> Vec<String> {
    let mut shapes_txt: Vec<String> = Vec::new();
    for (idx, line) in text.trim_matches('\n').lines().enumerate() {
        let parts = line.split('|').map(|s| s.trim_end());
        if idx == 0 {
            shapes_txt.extend(parts.map(|s| s.to_string()));
        } else {
            parts.enumerate().for_each(|(idx, part)| {
                if !part.is_empty() {
                    shapes_txt[idx].push('\n');
                    shapes_txt[idx].push_str(part);
                }
            });
        }
    }
    shapes_txt
}

fn parse_templates(text: &str, names: &[&'static str]) -> Vec<Template> {
    let shapes = split_shapes_txt(text);
    assert_eq!(
        shapes.len(),
        names.len(),
        "template table and name list differ in length"
    );
    shapes
        .iter()
        .zip(names)
        .map(|(txt, &name)| match Shape::parse(txt) {
            Ok(shape) => Template { name, shape },
            Err(err) => panic!("template {}: {}", name, err),
        })
        .collect()
}

fn main() {
    let out_dir = env::var_os("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("pieces.rs");

    let mut templates = parse_templates(CLASSIC_TXT, &CLASSIC_NAMES);
    let classic_len = templates.len();
    templates.extend(parse_templates(MIRRORED_TXT, &MIRRORED_NAMES));
    let extended_len = templates.len();

    let templates = TemplatesExt { templates };

    let code = quote! {
        pub const CLASSIC_LEN: usize = #classic_len;
        pub const EXTENDED_LEN: usize = #extended_len;
        static TEMPLATES: [Template; #extended_len] = [ #templates ];
    }
    .to_string();

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/shape.rs");

    let file = syn::parse_file(&code).unwrap();
    fs::write(&dest_path, prettyplease::unparse(&file)).unwrap();
}
