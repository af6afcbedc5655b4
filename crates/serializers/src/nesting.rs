//! Nesting-depth scan over bincode-encoded `Value`s.
//!
//! bincode decodes recursively with no depth bound, so a short run of nested
//! `Array` headers is enough to exhaust the stack. This scan walks the same
//! layout iteratively and rejects payloads nested deeper than
//! [`MAX_DEPTH`], the same bound `serde_json` applies.
//!
//! Malformed input (unknown tag, truncated length) ends the scan early and
//! is left for bincode to report, so its diagnostic stays the one callers see.

/// Deepest accepted `Array`/`Object` nesting.
pub(crate) const MAX_DEPTH: usize = 128;

// Variant indices of `flowresult_core::Value`, in declaration order.
const NULL: u32 = 0;
const BOOL: u32 = 1;
const INT: u32 = 2;
const FLOAT: u32 = 3;
const STRING: u32 = 4;
const BYTES: u32 = 5;
const TIMESTAMP: u32 = 6;
const ARRAY: u32 = 7;
const OBJECT: u32 = 8;

struct Frame {
    remaining: u64,
    keyed: bool,
}

struct Cursor<'a> {
    data: &'a [u8],
}

impl<'a> Cursor<'a> {
    fn skip(&mut self, n: u64) -> Option<()> {
        let n = usize::try_from(n).ok()?;
        self.data = self.data.get(n..)?;
        Some(())
    }

    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let head = self.data.get(..N)?.try_into().ok()?;
        self.data = &self.data[N..];
        Some(head)
    }

    fn u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }
}

/// Fails if `data` encodes a `Value` nested deeper than [`MAX_DEPTH`].
pub(crate) fn check_value_depth(data: &[u8]) -> Result<(), String> {
    if scan(data) == Some(true) {
        return Err(format!("nesting depth exceeds {}", MAX_DEPTH));
    }
    Ok(())
}

// `Some(true)` once the bound is crossed, `Some(false)` when the whole value
// was walked within it, `None` on malformed input.
fn scan(data: &[u8]) -> Option<bool> {
    let mut cursor = Cursor { data };
    let mut stack = vec![Frame {
        remaining: 1,
        keyed: false,
    }];

    loop {
        while stack.last().map_or(false, |f| f.remaining == 0) {
            stack.pop();
        }
        let frame = match stack.last_mut() {
            Some(frame) => frame,
            None => return Some(false),
        };
        frame.remaining -= 1;
        if frame.keyed {
            let len = cursor.u64()?;
            cursor.skip(len)?;
        }

        match cursor.u32()? {
            NULL => {}
            BOOL => cursor.skip(1)?,
            INT | FLOAT | TIMESTAMP => cursor.skip(8)?,
            STRING | BYTES => {
                let len = cursor.u64()?;
                cursor.skip(len)?;
            }
            tag @ (ARRAY | OBJECT) => {
                let remaining = cursor.u64()?;
                if remaining > 0 {
                    stack.push(Frame {
                        remaining,
                        keyed: tag == OBJECT,
                    });
                    // The root frame is not a nesting level
                    if stack.len() - 1 > MAX_DEPTH {
                        return Some(true);
                    }
                }
            }
            _ => return None,
        }
    }
}
