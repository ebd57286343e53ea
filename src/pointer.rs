// Last known pointer position, shared between the mousemove listener that writes it
// and the frame task that reads it. Everything runs on the page's single thread, so
// a Cell behind an Rc is all the synchronisation needed.

use std::cell::Cell;
use std::rc::Rc;
use vecmath::Vector2;

#[derive(Clone, Default, Debug)]
pub struct SharedPointer {
    pos: Rc<Cell<Option<Vector2<f64>>>>,
}

impl SharedPointer {
    pub const PAGE_START: Vector2<f64> = [0.0, 0.0];

    pub fn new() -> Self {
        SharedPointer::default()
    }

    pub fn at(x: f64, y: f64) -> Self {
        let pointer = SharedPointer::new();
        pointer.set(x, y);
        pointer
    }

    // The page treats the pointer as sitting at the top-left corner until the
    // first mousemove, so particles there are pushed away from the first frame
    pub fn at_page_start() -> Self {
        SharedPointer::at(SharedPointer::PAGE_START[0], SharedPointer::PAGE_START[1])
    }

    pub fn set(&self, x: f64, y: f64) {
        self.pos.set(Some([x, y]));
    }

    pub fn clear(&self) {
        self.pos.set(None);
    }

    pub fn get(&self) -> Option<Vector2<f64>> {
        self.pos.get()
    }
}
