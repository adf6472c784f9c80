/// Name of the capture file for the connection numbered `counter`.
///
/// The first connection gets the bare name; later ones carry the counter
/// between stem and extension, without padding.
pub fn output_file_name(stem: &str, extension: &str, counter: u64) -> String {
    if counter == 0 {
        format!("{stem}.{extension}")
    } else {
        format!("{stem}{counter}.{extension}")
    }
}

/// Per-process connection counter. Starts before the first connection and
/// only moves forward.
#[derive(Debug, Default)]
pub struct ConnectionCounter {
    next: u64,
}

impl ConnectionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the number for a freshly accepted connection.
    pub fn advance(&mut self) -> u64 {
        let current = self.next;
        self.next += 1;
        current
    }

    /// Connections accepted so far.
    pub fn served(&self) -> u64 {
        self.next
    }
}
