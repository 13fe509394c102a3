// Raw wire-format models.
//
// These mirror what the host server actually prints, one line per entry.
// Domain normalization (transport kind, online state) happens in
// adbfleet-core; this crate only splits fields.

/// One line of `host:devices-l` output.
///
/// Format: `SERIAL  STATE product:X model:Y device:Z transport_id:N`.
/// The key/value tail is best-effort -- unauthorized devices omit it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEntry {
    pub serial: String,
    pub state: String,
    pub product: Option<String>,
    pub model: Option<String>,
    pub device: Option<String>,
}

impl DeviceEntry {
    pub(crate) fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        let serial = fields.next()?.to_owned();
        let state = fields.next()?.to_owned();

        let mut entry = Self {
            serial,
            state,
            product: None,
            model: None,
            device: None,
        };

        for field in fields {
            if let Some((key, value)) = field.split_once(':') {
                match key {
                    "product" => entry.product = Some(value.to_owned()),
                    "model" => entry.model = Some(value.to_owned()),
                    "device" => entry.device = Some(value.to_owned()),
                    _ => {}
                }
            }
        }
        Some(entry)
    }
}

/// One line of `reverse:list-forward` output.
///
/// Format: `TRANSPORT REMOTE LOCAL`, where the specs look like `tcp:27183`.
/// Remote is the device-side listener, local the host-side target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseEntry {
    pub transport: String,
    pub remote: String,
    pub local: String,
}

impl ReverseEntry {
    pub(crate) fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        Some(Self {
            transport: fields.next()?.to_owned(),
            remote: fields.next()?.to_owned(),
            local: fields.next()?.to_owned(),
        })
    }

    /// Device-side TCP port, if the remote spec is `tcp:<port>`.
    pub fn remote_port(&self) -> Option<u16> {
        parse_tcp_spec(&self.remote)
    }

    /// Host-side TCP port, if the local spec is `tcp:<port>`.
    pub fn local_port(&self) -> Option<u16> {
        parse_tcp_spec(&self.local)
    }
}

fn parse_tcp_spec(spec: &str) -> Option<u16> {
    spec.strip_prefix("tcp:")?.parse().ok()
}
