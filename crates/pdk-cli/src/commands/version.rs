//! Version string shared by `--version` and `pdk version`.

use std::io::Write;

/// `<version> <commit> <build date>`; commit and date come from the build
/// environment when release tooling provides them.
pub fn format() -> String {
    format!(
        "{} {} {}",
        env!("CARGO_PKG_VERSION"),
        option_env!("PDK_BUILD_COMMIT").unwrap_or("none"),
        option_env!("PDK_BUILD_DATE").unwrap_or("unknown"),
    )
}

pub fn run() -> std::io::Result<()> {
    writeln!(std::io::stdout(), "pdk {}", format())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_package_version() {
        let v = format();
        assert!(v.starts_with(env!("CARGO_PKG_VERSION")));
        assert_eq!(v.split(' ').count(), 3);
    }
}
