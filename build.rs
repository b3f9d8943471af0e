use std::path::Path;

fn main() {
    let panel_path = Path::new("panels/build_markers.json");
    validate_panel_file(panel_path);
    set_build_dependencies();
}

fn validate_panel_file(panel_path: &Path) {
    // Ensure panel exists at build time
    assert!(
        panel_path.exists(),
        "\n\nPANEL BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the marker panel file before building.\n",
        panel_path.display()
    );

    let panel_contents = std::fs::read_to_string(panel_path).unwrap_or_else(|e| {
        panic!(
            "\n\nPANEL BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            panel_path.display()
        );
    });

    let panel: serde_json::Value = serde_json::from_str(&panel_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nPANEL BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            panel_path.display()
        );
    });

    validate_panel_structure(&panel);
}

fn validate_panel_structure(panel: &serde_json::Value) {
    assert!(
        panel.is_object(),
        "\n\nPANEL BUILD ERROR: Root must be a JSON object\n\
         Got: {panel}\n"
    );

    let markers = panel.get("markers").unwrap_or_else(|| {
        panic!(
            "\n\nPANEL BUILD ERROR: Missing 'markers' field\n\
             The panel must have a top-level 'markers' array.\n"
        );
    });

    let markers = markers.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nPANEL BUILD ERROR: 'markers' must be an array\n\
             Got: {markers}\n"
        );
    });

    assert!(
        !markers.is_empty(),
        "\n\nPANEL BUILD ERROR: 'markers' must not be empty\n"
    );

    for (i, marker) in markers.iter().enumerate() {
        validate_marker(marker, i);
    }

    println!(
        "cargo:warning=Validated marker panel: {} markers",
        markers.len()
    );
}

fn validate_marker(marker: &serde_json::Value, index: usize) {
    let rsid = marker
        .get("rsid")
        .and_then(|v| v.as_str())
        .unwrap_or_else(|| {
            panic!("\n\nPANEL BUILD ERROR: Marker at index {index} missing 'rsid' field\n");
        });

    for build in ["grch37", "grch38"] {
        let site = marker
            .get(build)
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| {
                panic!(
                    "\n\nPANEL BUILD ERROR: Marker '{rsid}' (index {index}) missing '{build}' field\n"
                );
            });
        validate_site(site, rsid, build);
    }
}

fn validate_site(site: &str, rsid: &str, build: &str) {
    let fields: Vec<&str> = site.split('_').collect();
    assert!(
        fields.len() == 4,
        "\n\nPANEL BUILD ERROR: Marker '{rsid}' {build} site '{site}' must look like \
         chrom_pos_ref_alt1,alt2\n"
    );
    assert!(
        fields[1].parse::<u64>().map(|p| p > 0).unwrap_or(false),
        "\n\nPANEL BUILD ERROR: Marker '{rsid}' {build} site '{site}' has an invalid position\n"
    );
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the panel changes
    println!("cargo:rerun-if-changed=panels/build_markers.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
