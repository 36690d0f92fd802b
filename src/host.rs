use crate::geometry::ChildPlacement;

/// What the panel core needs from the UI toolkit it is embedded in.
///
/// The coordinator is the only caller; it never draws or schedules frames
/// itself, it asks the host to.
pub trait LayoutHost {
    /// Move the child to `placement` immediately.
    fn place_child(&mut self, placement: ChildPlacement);

    /// Ask for a layout pass. The host answers by calling
    /// [`DragCoordinator::layout`](crate::drag::DragCoordinator::layout) with
    /// the current viewport.
    fn request_layout(&mut self);

    /// A new child position was produced; repaint when convenient.
    fn request_redraw(&mut self) {}
}

impl<T: LayoutHost + ?Sized> LayoutHost for &mut T {
    fn place_child(&mut self, placement: ChildPlacement) {
        (**self).place_child(placement)
    }

    fn request_layout(&mut self) {
        (**self).request_layout()
    }

    fn request_redraw(&mut self) {
        (**self).request_redraw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Dummy {
        placed: Option<ChildPlacement>,
        layouts: usize,
    }

    impl LayoutHost for Dummy {
        fn place_child(&mut self, placement: ChildPlacement) {
            self.placed = Some(placement);
        }

        fn request_layout(&mut self) {
            self.layouts += 1;
        }
    }

    fn drive<H: LayoutHost>(mut host: H) {
        host.place_child(ChildPlacement {
            x: -3,
            y: 0,
            width: 5,
            height: 2,
        });
        host.request_layout();
        host.request_redraw();
    }

    #[test]
    fn blanket_impl_for_mut_ref_works() {
        let mut d = Dummy::default();
        drive(&mut d);
        assert_eq!(d.placed.map(|p| p.x), Some(-3));
        assert_eq!(d.layouts, 1);
    }
}
