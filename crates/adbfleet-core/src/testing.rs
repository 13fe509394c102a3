// Scripted in-process fleet for driving the orchestrators in tests.

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use adbfleet_bridge::Error as BridgeError;

use crate::bridge::DeviceBridge;
use crate::model::{Device, DeviceState, TunnelRule};
use crate::suspend::RefreshGate;

/// Interface text with no IPv4 address assigned.
pub(crate) const WLAN_MISS: &str =
    "30: wlan0: <NO-CARRIER,BROADCAST,MULTICAST,UP> mtu 1500 state DOWN\n\
     \x20   link/ether aa:bb:cc:dd:ee:ff brd ff:ff:ff:ff:ff:ff\n";

/// Interface text carrying `ip` as the global IPv4 address.
pub(crate) fn wlan_reply(ip: &str) -> String {
    format!(
        "30: wlan0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 state UP\n\
         \x20   link/ether aa:bb:cc:dd:ee:ff brd ff:ff:ff:ff:ff:ff\n\
         \x20   inet6 fe80::a8bb:ccff:fedd:eeff/64 scope link\n\
         \x20   inet {ip}/24 brd 192.168.1.255 scope global wlan0\n"
    )
}

/// A fake fleet with scripted replies and failure switches. Interface
/// queries consume `wlan_replies` front to back; an exhausted queue
/// answers with no address.
#[derive(Default)]
pub(crate) struct MockBridge {
    devices: Mutex<Vec<Device>>,
    wlan_replies: Mutex<VecDeque<String>>,
    shell_log: Mutex<Vec<(String, String)>>,
    connect_log: Mutex<Vec<String>>,
    rules: Mutex<HashMap<String, Vec<TunnelRule>>>,
    rule_failures: Mutex<HashSet<String>>,
    listen_calls: AtomicUsize,
    rule_calls: AtomicUsize,
    enumeration_fails: AtomicBool,
    shell_fails: AtomicBool,
    listen_fails: AtomicBool,
    connect_fails: AtomicBool,
}

impl MockBridge {
    pub(crate) fn with_devices(serials: &[&str]) -> Self {
        let devices = serials
            .iter()
            .map(|s| Device::new(*s, DeviceState::Online))
            .collect();
        Self {
            devices: Mutex::new(devices),
            ..Self::default()
        }
    }

    pub(crate) fn queue_wlan_reply(&self, text: &str) {
        self.wlan_replies.lock().unwrap().push_back(text.to_owned());
    }

    pub(crate) fn shell_count(&self, command: &str) -> usize {
        self.shell_log
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, c)| c == command)
            .count()
    }

    pub(crate) fn listen_calls(&self) -> usize {
        self.listen_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn connect_targets(&self) -> Vec<String> {
        self.connect_log.lock().unwrap().clone()
    }

    pub(crate) fn rules_for(&self, serial: &str) -> Vec<TunnelRule> {
        self.rules
            .lock()
            .unwrap()
            .get(serial)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn rule_call_count(&self) -> usize {
        self.rule_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn drop_rule(&self, serial: &str, remote: u16) {
        if let Some(rules) = self.rules.lock().unwrap().get_mut(serial) {
            rules.retain(|r| r.remote_port != remote);
        }
    }

    pub(crate) fn fail_enumeration(&self) {
        self.enumeration_fails.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_shell(&self) {
        self.shell_fails.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_listen(&self) {
        self.listen_fails.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_connect(&self) {
        self.connect_fails.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_rules_for(&self, serial: &str) {
        self.rule_failures.lock().unwrap().insert(serial.to_owned());
    }

    fn rejected(message: &str) -> BridgeError {
        BridgeError::Rejected {
            service: "mock".to_owned(),
            message: message.to_owned(),
        }
    }
}

#[async_trait]
impl DeviceBridge for MockBridge {
    async fn list_devices(&self) -> Result<Vec<Device>, BridgeError> {
        if self.enumeration_fails.load(Ordering::SeqCst) {
            return Err(Self::rejected("cannot connect to daemon"));
        }
        Ok(self.devices.lock().unwrap().clone())
    }

    async fn run_shell(&self, serial: &str, command: &str) -> Result<String, BridgeError> {
        self.shell_log
            .lock()
            .unwrap()
            .push((serial.to_owned(), command.to_owned()));
        if self.shell_fails.load(Ordering::SeqCst) {
            return Err(Self::rejected("device offline"));
        }
        if command.contains("wlan0") {
            let reply = self.wlan_replies.lock().unwrap().pop_front();
            return Ok(reply.unwrap_or_else(|| WLAN_MISS.to_owned()));
        }
        Ok(String::new())
    }

    async fn set_listen_mode(&self, _serial: &str, _port: u16) -> Result<(), BridgeError> {
        self.listen_calls.fetch_add(1, Ordering::SeqCst);
        if self.listen_fails.load(Ordering::SeqCst) {
            return Err(Self::rejected("closed"));
        }
        Ok(())
    }

    async fn connect(&self, address: &str) -> Result<String, BridgeError> {
        self.connect_log.lock().unwrap().push(address.to_owned());
        if self.connect_fails.load(Ordering::SeqCst) {
            return Err(Self::rejected("connection refused"));
        }
        Ok(format!("connected to {address}"))
    }

    async fn disconnect(&self, serial: &str) -> Result<(), BridgeError> {
        self.devices.lock().unwrap().retain(|d| d.serial != serial);
        Ok(())
    }

    async fn add_reverse_rule(
        &self,
        serial: &str,
        remote: u16,
        local: u16,
    ) -> Result<(), BridgeError> {
        self.rule_calls.fetch_add(1, Ordering::SeqCst);
        if self.rule_failures.lock().unwrap().contains(serial) {
            return Err(Self::rejected("device offline"));
        }
        let mut rules = self.rules.lock().unwrap();
        let device_rules = rules.entry(serial.to_owned()).or_default();
        // Re-installing rebinds in place rather than duplicating.
        device_rules.retain(|r| r.remote_port != remote);
        device_rules.push(TunnelRule {
            remote_port: remote,
            local_port: local,
        });
        Ok(())
    }

    async fn remove_reverse_rule(&self, serial: &str, remote: u16) -> Result<(), BridgeError> {
        self.rule_calls.fetch_add(1, Ordering::SeqCst);
        if self.rule_failures.lock().unwrap().contains(serial) {
            return Err(Self::rejected("device offline"));
        }
        let mut rules = self.rules.lock().unwrap();
        let device_rules = rules.entry(serial.to_owned()).or_default();
        if !device_rules.iter().any(|r| r.remote_port == remote) {
            return Err(Self::rejected("listener not found"));
        }
        device_rules.retain(|r| r.remote_port != remote);
        Ok(())
    }

    async fn list_reverse_rules(&self, serial: &str) -> Result<Vec<TunnelRule>, BridgeError> {
        if self.rule_failures.lock().unwrap().contains(serial) {
            return Err(Self::rejected("device offline"));
        }
        Ok(self.rules_for(serial))
    }
}

/// Gate that counts suspend/resume pairs.
#[derive(Default)]
pub(crate) struct CountingGate {
    suspended: AtomicUsize,
    resumed: AtomicUsize,
}

impl CountingGate {
    pub(crate) fn suspend_count(&self) -> usize {
        self.suspended.load(Ordering::SeqCst)
    }

    pub(crate) fn resume_count(&self) -> usize {
        self.resumed.load(Ordering::SeqCst)
    }
}

impl RefreshGate for CountingGate {
    fn suspend(&self) {
        self.suspended.fetch_add(1, Ordering::SeqCst);
    }

    fn resume(&self) {
        self.resumed.fetch_add(1, Ordering::SeqCst);
    }
}
