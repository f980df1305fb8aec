use std::{
    cell::{Ref, RefCell, RefMut},
    rc::Rc,
};

// OracleObj lets the channels of one environment share a component (predictor,
// scoreboard, channel) and mutate it on delivery. All deliveries happen on the
// thread owning the environment, so Rc/RefCell is enough. Threads go through the
// mailbox instead.
pub struct OracleObj<T>(Rc<RefCell<T>>);

impl<T> OracleObj<T> {
    pub fn new(data: T) -> OracleObj<T> {
        OracleObj(Rc::new(RefCell::new(data)))
    }
    pub fn get(&self) -> Ref<'_, T> {
        (*self.0).borrow()
    }
    pub fn get_mut(&self) -> RefMut<'_, T> {
        (*self.0).borrow_mut()
    }
    // The borrow ends before the closure's result is handed back, so callers can
    // publish afterwards without holding it.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut *self.get_mut())
    }
    // None while any other borrow is live, e.g. during a delivery.
    pub fn try_get_mut(&self) -> Option<RefMut<'_, T>> {
        self.0.try_borrow_mut().ok()
    }
}

impl<T> Clone for OracleObj<T> {
    fn clone(&self) -> Self {
        OracleObj(self.0.clone())
    }
}
