use std::fmt;

use mdk_loader::{MdkApi, SymbolGroup, SYMBOLS};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GroupStatus {
    pub header: &'static str,
    pub resolved: usize,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub path: String,
    pub version: i32,
    pub version_string: String,
    pub complete: bool,
    pub groups: Vec<GroupStatus>,
    pub missing: Vec<&'static str>,
}

impl Report {
    pub fn new(api: &MdkApi) -> Self {
        let (major, minor, micro) = api.version_triple();
        let groups = SymbolGroup::ALL
            .iter()
            .map(|&group| {
                let symbols = SYMBOLS.iter().filter(|s| s.group == group);
                GroupStatus {
                    header: group.header(),
                    resolved: symbols.clone().filter(|s| api.has_symbol(s.name)).count(),
                    total: symbols.count(),
                }
            })
            .collect();

        Self {
            path: api.path().display().to_string(),
            version: api.version(),
            version_string: format!("{major}.{minor}.{micro}"),
            complete: api.is_complete(),
            groups,
            missing: api.missing(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "library: {}", self.path)?;
        writeln!(f, "version: {} ({:#08x})", self.version_string, self.version)?;
        for group in &self.groups {
            writeln!(f, "  {:<14} {}/{}", group.header, group.resolved, group.total)?;
        }
        if self.missing.is_empty() {
            writeln!(f, "all symbols resolved")
        } else {
            writeln!(f, "missing: {}", self.missing.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_report_lists_groups_and_missing() {
        let report = Report {
            path: "/opt/mdk/libmdk.so.0".into(),
            version: 0x0801,
            version_string: "0.8.1".into(),
            complete: false,
            groups: vec![GroupStatus {
                header: "Player.h",
                resolved: 2,
                total: 3,
            }],
            missing: vec!["MDK_foreignGLContextDestroyed"],
        };

        let text = report.to_string();
        assert!(text.contains("library: /opt/mdk/libmdk.so.0"));
        assert!(text.contains("version: 0.8.1 (0x000801)"));
        assert!(text.contains("Player.h"));
        assert!(text.contains("2/3"));
        assert!(text.ends_with("missing: MDK_foreignGLContextDestroyed\n"));
    }
}
