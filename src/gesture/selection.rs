use crate::model::task::DayRange;

/// An in-progress drag across day cells.
///
/// `anchor` is where the drag began and `head` where the pointer last was.
/// They are kept raw so the drag can go in either direction; `range()`
/// normalizes on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    anchor: u32,
    head: u32,
}

impl Selection {
    /// Start selecting on `day`. Placeholder cells (`None`) and day 0 start nothing.
    pub fn begin(day: Option<u32>) -> Option<Self> {
        let day = day.filter(|&d| d > 0)?;
        Some(Selection {
            anchor: day,
            head: day,
        })
    }

    /// Pointer entered another cell. Returns whether the head moved.
    pub fn extend(&mut self, day: Option<u32>) -> bool {
        match day.filter(|&d| d > 0) {
            Some(d) if d != self.head => {
                self.head = d;
                true
            }
            _ => false,
        }
    }

    pub fn anchor(&self) -> u32 {
        self.anchor
    }

    pub fn head(&self) -> u32 {
        self.head
    }

    /// Current range, normalized
    pub fn range(&self) -> DayRange {
        DayRange::normalized(self.anchor, self.head)
    }

    /// Release: consume the selection and hand back the finished range
    pub fn finish(self) -> DayRange {
        self.range()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_ignores_placeholders() {
        assert!(Selection::begin(None).is_none());
        assert!(Selection::begin(Some(0)).is_none());
        let sel = Selection::begin(Some(7)).unwrap();
        assert_eq!(sel.range(), DayRange { start: 7, end: 7 });
    }

    #[test]
    fn drag_backwards_keeps_anchor() {
        let mut sel = Selection::begin(Some(12)).unwrap();
        assert!(sel.extend(Some(11)));
        assert!(sel.extend(Some(10)));
        assert!(!sel.extend(None));
        assert!(!sel.extend(Some(10)));
        assert_eq!(sel.anchor(), 12);
        assert_eq!(sel.head(), 10);
        assert_eq!(sel.finish(), DayRange { start: 10, end: 12 });
    }

    #[test]
    fn normalized_range_is_ordered() {
        for (a, b) in [(1, 31), (31, 1), (15, 15), (3, 2)] {
            let mut sel = Selection::begin(Some(a)).unwrap();
            sel.extend(Some(b));
            let range = sel.finish();
            assert!(range.start <= range.end);
            assert_eq!(range.start, a.min(b));
            assert_eq!(range.end, a.max(b));
        }
    }
}
