//! Sample definitions documents for tests.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::{EntityStore, parse_definitions};

/// A named definitions document.
#[derive(Clone, Debug)]
pub struct DefinitionsFixture {
    pub content: String,
    pub name: String,
}

impl DefinitionsFixture {
    /// Alert and macro dependency chain with no shared notifications.
    ///
    /// `os.cpu` resolves to `ping.host, scollector.down, host_based, os.cpu`.
    pub fn dependency_chain() -> Self {
        Self {
            name: "dependency_chain".to_string(),
            content: r#"
[macro.host_based]
depends = 'alert("scollector.down","warn")'

[alert."ping.host"]
"$q" = 'max(rename(q("sum:bosun.ping.timeout{dst_host=*,host=*}", "1m", ""), "host=source,dst_host=host"))'
warn = "$q"

[alert."scollector.down"]
depends = 'alert("ping.host", "warn")'
"$a" = 'avg(q("avg:os.cpu{host=*}", "1m", "")) < -100'
warn = "$a"

[alert."os.cpu"]
macro = "host_based"
warn = 'avg(q("avg:os.cpu{host=*}", "1m", "")) > 50'
"#
            .trim()
            .to_string(),
        }
    }

    /// A production-like document where most alerts share one notification
    /// and one template.
    ///
    /// `always.good` resolves to `generic, default, ping.host,
    /// scollector.down, host_based, always.good`.
    pub fn shared_notification() -> Self {
        Self {
            name: "shared_notification".to_string(),
            content: r#"
[notification.default]
email = "oncall@example.com"
print = true

[template.unknown]
subject = "{{.Name}}: {{.Group | len}} unknown alerts"
body = """
<p>Time: {{.Time}}
<p>Name: {{.Name}}
<p>Alerts:
{{range .Group}}
    <br>{{.}}
{{end}}"""

[template.generic]
body = """
<a href="{{.Ack}}">Acknowledge alert</a>
<p>Name: {{.Alert.Name}}
<p>Crit: {{.Alert.Crit}}"""
subject = "{{.Last.Status}}: {{.Alert.Name}}:  on {{.Group.host}}"

[macro.host_based]
depends = 'alert("scollector.down", "warn")'

[alert."ping.host"]
template = "generic"
"$q" = 'max(rename(q("sum:bosun.ping.timeout{dst_host=*,host=*}", "1m", ""), "host=source,dst_host=host"))'
warn = "$q"
warnNotification = "default"

[alert."scollector.down"]
template = "generic"
depends = 'alert("ping.host", "warn")'
"$a" = 'avg(q("avg:os.cpu{host=*}", "1m", "")) < -100'
"$b" = 'avg(q("avg:os.mem.percent_free{host=*}", "1m", "")) < -100'
"$c" = 'avg(q("avg:os.net.bytes{host=*}", "1m", "")) < -100'
warn = "$a || $b || $c"
warnNotification = "default"

[alert."os.cpu"]
macro = "host_based"
template = "generic"
"$q" = 'avg(q("avg:rate{counter,,1}:os.cpu{host=*}", "1m", ""))'
warn = "$q < 99"
warnNotification = "default"

[alert."os.cpu.no_dependency"]
template = "generic"
"$q" = 'avg(q("avg:rate{counter,,1}:os.cpu{host=*}", "1m", ""))'
warn = "$q < 99"
warnNotification = "default"

[alert."always.good"]
macro = "host_based"
template = "generic"
"$q" = 'avg(q("avg:rate{counter,,1}:os.cpu{host=*}", "1m", ""))'
warn = "$q > 200"
warnNotification = "default"

[alert."os.mem"]
macro = "host_based"
template = "generic"
"$q" = 'avg(q("avg:os.mem.percent_free{host=*}", "1m", ""))'
crit = "$q < 99"
critNotification = "default"
"#
            .trim()
            .to_string(),
        }
    }

    /// Two alerts suppressing each other.
    pub fn mutual_cycle() -> Self {
        Self {
            name: "mutual_cycle".to_string(),
            content: r#"
[alert.a]
depends = 'alert("b", "warn")'

[alert.b]
depends = 'alert("a", "warn")'

[alert.healthy]
warn = "1"
"#
            .trim()
            .to_string(),
        }
    }

    /// An alert depending on an alert that is never defined.
    pub fn undefined_reference() -> Self {
        Self {
            name: "undefined_reference".to_string(),
            content: r#"
[alert.c]
depends = 'alert("x", "warn")'

[alert."os.cpu"]
warn = "1"
"#
            .trim()
            .to_string(),
        }
    }

    /// Parse the fixture into a store.
    pub fn store(&self) -> Result<EntityStore> {
        parse_definitions(&self.content, &format!("{}.toml", self.name))
            .with_context(|| format!("Fixture '{}' does not parse", self.name))
    }

    /// Write the fixture to `<dir>/<name>.toml`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(format!("{}.toml", self.name));
        fs::write(&path, &self.content)?;
        Ok(path)
    }
}
