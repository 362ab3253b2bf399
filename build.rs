use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=data/");

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("bundled_datasets.rs");
    let mut f = fs::File::create(&dest_path).unwrap();

    let data_dir = Path::new("data");
    if !data_dir.exists() {
        writeln!(f, "pub const BUNDLED_DATASETS: &[(&str, &str)] = &[];").unwrap();
        return;
    }

    let mut entries: Vec<_> = fs::read_dir(data_dir)
        .unwrap()
        .map(|res| res.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();

    // Stable order so the generated table doesn't churn between builds
    entries.sort();

    writeln!(f, "pub const BUNDLED_DATASETS: &[(&str, &str)] = &[").unwrap();
    for path in entries {
        println!("cargo:rerun-if-changed={}", path.display());

        let stem = path.file_stem().unwrap().to_string_lossy().to_string();
        let absolute = fs::canonicalize(&path).unwrap();
        // {:?} gives a quoted, escaped literal that include_str! accepts
        writeln!(
            f,
            "    ({:?}, include_str!({:?})),",
            stem,
            absolute.display().to_string()
        )
        .unwrap();
    }
    writeln!(f, "];").unwrap();
}
