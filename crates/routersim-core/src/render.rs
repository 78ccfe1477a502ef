//! Running-configuration rendering.

use crate::router::RouterCore;

impl RouterCore {
    /// Render the current state as IOS configuration text.
    ///
    /// Regenerated on every call; there is no cached copy to go stale.
    pub fn running_config(&self) -> String {
        let mut lines = vec![
            "!".to_string(),
            format!("version {}", self.version),
            "!".to_string(),
            format!("hostname {}", self.hostname),
            "!".to_string(),
        ];
        if let Some(secret) = &self.enable_secret {
            lines.push(format!("enable secret {secret}"));
            lines.push("!".to_string());
        }
        if let Some(banner) = &self.banner_motd {
            lines.push(format!("banner motd ^C{banner}^C"));
            lines.push("!".to_string());
        }

        for iface in &self.interfaces {
            lines.push(format!("interface {}", iface.name));
            if let Some(desc) = &iface.description {
                lines.push(format!(" description {desc}"));
            }
            lines.push(match &iface.address {
                Some(net) => format!(" ip address {} {}", net.address, net.mask),
                None => " no ip address".to_string(),
            });
            if !iface.up {
                lines.push(" shutdown".to_string());
            }
            lines.push("!".to_string());
        }

        let mut processes: Vec<_> = self.ospf.iter().collect();
        processes.sort_by_key(|p| p.process_id);
        for process in processes {
            lines.push(format!("router ospf {}", process.process_id));
            if let Some(id) = process.router_id {
                lines.push(format!(" router-id {id}"));
            }
            for net in &process.networks {
                lines.push(format!(
                    " network {} {} area {}",
                    net.address, net.wildcard, net.area
                ));
            }
            lines.push("!".to_string());
        }

        if !self.static_routes.is_empty() {
            for route in &self.static_routes {
                lines.push(format!(
                    "ip route {} {} {}",
                    route.network.network(),
                    route.network.mask,
                    route.next_hop
                ));
            }
            lines.push("!".to_string());
        }

        lines.push("line con 0".to_string());
        if let Some(password) = &self.line_console.password {
            lines.push(format!(" password {password}"));
        }
        if self.line_console.login {
            lines.push(" login".to_string());
        }
        lines.push("!".to_string());
        lines.push("end".to_string());

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}
