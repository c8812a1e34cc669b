use std::fs;

const DEFAULT_CONFIG: &str = "src/default_config.toml";
const SECTIONS: [&str; 3] = ["paths", "site", "render"];

fn main() {
    println!("cargo:rerun-if-changed={DEFAULT_CONFIG}");

    let content = fs::read_to_string(DEFAULT_CONFIG)
        .unwrap_or_else(|e| panic!("sitegen: cannot read bundled config {DEFAULT_CONFIG}: {e}"));
    let table = content
        .parse::<toml::Table>()
        .unwrap_or_else(|e| panic!("sitegen: bundled config {DEFAULT_CONFIG} is not TOML: {e}"));

    // every table Config deserialises must be present
    for section in SECTIONS {
        if !table.get(section).is_some_and(toml::Value::is_table) {
            panic!("sitegen: bundled config {DEFAULT_CONFIG} lacks a [{section}] table");
        }
    }
}
