/// One of the two light-sensitive elements wired to the comparator inputs.
///
/// The same pair is used for threshold checks against the internal reference
/// and for the direct element-versus-element comparison.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum SensingElement {
    A,
    B,
}

impl SensingElement {
    pub fn opposite(&self) -> SensingElement {
        match self {
            SensingElement::A => SensingElement::B,
            SensingElement::B => SensingElement::A,
        }
    }

    /// Input-select index of the element on the comparator multiplexer.
    pub fn index(&self) -> usize {
        match self {
            SensingElement::A => 0,
            SensingElement::B => 1,
        }
    }
}

/// The analog comparator peripheral as seen by the tracker.
///
/// Implementations own the settle time: a reading is only returned after the
/// newly selected configuration has had ~1 ms to stabilise.
pub trait Comparator {
    /// Compares `element` against the internal reference ladder code
    /// `reference` and returns `true` when the sensed level is at or above it.
    fn read_threshold(&mut self, element: SensingElement, reference: u8) -> bool;

    /// Compares the two elements directly and returns `Some(true)` when
    /// element A reads greater than element B. `None` means no reading could
    /// be taken.
    fn read_direct(&mut self) -> Option<bool>;

    /// Returns the peripheral to its neutral, unpowered configuration.
    fn disable(&mut self);
}

impl<C: Comparator + ?Sized> Comparator for &mut C {
    fn read_threshold(&mut self, element: SensingElement, reference: u8) -> bool {
        (**self).read_threshold(element, reference)
    }

    fn read_direct(&mut self) -> Option<bool> {
        (**self).read_direct()
    }

    fn disable(&mut self) {
        (**self).disable()
    }
}
