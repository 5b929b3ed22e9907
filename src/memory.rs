use std::fs;

/// Tracks the largest resident set size seen at the points `sample` is
/// called. Only a report; nothing in mining reads it.
pub struct MemorySampler {
    peak_kib: Option<u64>,
}

impl MemorySampler {
    pub fn new() -> MemorySampler {
        MemorySampler { peak_kib: None }
    }

    pub fn sample(&mut self) {
        let status = match fs::read_to_string("/proc/self/status") {
            Ok(status) => status,
            Err(_) => return,
        };
        if let Some(kib) = high_water_mark_kib(&status) {
            self.peak_kib = Some(self.peak_kib.map_or(kib, |peak| peak.max(kib)));
        }
    }

    pub fn peak_mib(&self) -> Option<f64> {
        self.peak_kib.map(|kib| kib as f64 / 1024.0)
    }
}

// VmHWM is the kernel's own peak; VmRSS is the fallback when it's absent.
fn high_water_mark_kib(status: &str) -> Option<u64> {
    field_kib(status, "VmHWM:").or_else(|| field_kib(status, "VmRSS:"))
}

fn field_kib(status: &str, field: &str) -> Option<u64> {
    status
        .lines()
        .find(|line| line.starts_with(field))
        .and_then(|line| line[field.len()..].split_whitespace().next())
        .and_then(|value| value.parse::<u64>().ok())
}
