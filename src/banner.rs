// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    // Using a raw string literal for the multi-line banner
    let banner = r#"
 ____  _        ___
| __ )(_) __ _ / _ \
|  _ \| |/ _` | | | |
| |_) | | (_| | |_| |
|____/|_|\__, |\___/
         |___/

    AI Time Complexity & TLE Analysis
"#;
    println!("{}", banner);
}
