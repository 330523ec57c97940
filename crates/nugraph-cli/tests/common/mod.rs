use std::io::Write;
use std::path::Path;

use assert_cmd::Command;

#[allow(deprecated)]
pub fn nugraph_cmd() -> Command {
    Command::cargo_bin("nugraph").unwrap()
}

pub fn write_package(dir: &Path, id: &str, version: &str, deps: &[(&str, &str)]) {
    let deps: String = deps
        .iter()
        .map(|(d, v)| format!(r#"<dependency id="{d}" version="{v}" />"#))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<package>
  <metadata>
    <id>{id}</id>
    <version>{version}</version>
    <authors>{id} Team</authors>
    <dependencies>{deps}</dependencies>
  </metadata>
</package>"#
    );
    let path = dir.join(format!("{}.{version}.nupkg", id.to_lowercase()));
    let mut zip = zip::ZipWriter::new(std::fs::File::create(path).unwrap());
    zip.start_file(format!("{id}.nuspec"), zip::write::SimpleFileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap();
}

/// App 1.0.0 -> Lib 2.0.0 -> {Core 1.0.0, Missing 9.9.9 (absent)}
pub fn sample_feed(dir: &Path) {
    write_package(dir, "App", "1.0.0", &[("Lib", "2.0.0")]);
    write_package(
        dir,
        "Lib",
        "2.0.0",
        &[("Core", "1.0.0"), ("Missing", "9.9.9")],
    );
    write_package(dir, "Core", "1.0.0", &[]);
}
