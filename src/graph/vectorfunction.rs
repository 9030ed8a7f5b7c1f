use std::cell::{
    Ref,
    RefCell,
    RefMut
};
use std::rc::Rc;

use crate::graph::functionerror::FunctionError;
use crate::graph::integrationscheme::IntegrationScheme;
use crate::graph::piecewisefunction::{
    PiecewiseFunction,
    Point2D
};

/// A pair of [`PiecewiseFunction`]s representing the x and y components
/// of a 2-D quantity over time.
///
/// Both components live behind shared cells so a function returned by
/// [`integrate`](VectorFunction::integrate) keeps aliasing the integral
/// caches of its derivative: trailing inserts on the derivative show up
/// here without any extra bookkeeping. The two components share a time
/// domain only because callers always mutate them together; nothing is
/// enforced beyond that.
#[derive(Clone, Default)]
pub struct VectorFunction {
    x_cell: Rc<RefCell<PiecewiseFunction>>,
    y_cell: Rc<RefCell<PiecewiseFunction>>
}

impl VectorFunction {
    pub fn new() -> VectorFunction {
        VectorFunction {
            x_cell: Rc::new(RefCell::new(PiecewiseFunction::new())),
            y_cell: Rc::new(RefCell::new(PiecewiseFunction::new()))
        }
    }

    fn from_cells(x_cell: Rc<RefCell<PiecewiseFunction>>,
                  y_cell: Rc<RefCell<PiecewiseFunction>>) -> VectorFunction {
        VectorFunction { x_cell, y_cell }
    }

    pub fn x(&self) -> Ref<'_, PiecewiseFunction> {
        self.x_cell.borrow()
    }

    pub fn y(&self) -> Ref<'_, PiecewiseFunction> {
        self.y_cell.borrow()
    }

    pub fn x_mut(&self) -> RefMut<'_, PiecewiseFunction> {
        self.x_cell.borrow_mut()
    }

    pub fn y_mut(&self) -> RefMut<'_, PiecewiseFunction> {
        self.y_cell.borrow_mut()
    }

    pub fn insert(&self, time: f64, x: f64, y: f64) -> Result<(), FunctionError> {
        self.x_cell.borrow_mut().insert(time, x, false)?;
        self.y_cell.borrow_mut().insert(time, y, false)
    }

    pub fn append(&self, dt: f64, dx: f64, dy: f64) -> Result<(), FunctionError> {
        self.x_cell.borrow_mut().append(dt, dx)?;
        self.y_cell.borrow_mut().append(dt, dy)
    }

    pub fn pop(&self, index: isize) -> Result<(Point2D, Point2D), FunctionError> {
        let x = self.x_cell.borrow_mut().pop(index)?;
        let y = self.y_cell.borrow_mut().pop(index)?;
        Ok((x, y))
    }

    pub fn seek(&self, index: isize) -> Result<(Point2D, Point2D), FunctionError> {
        let x = self.x_cell.borrow().seek(index)?;
        let y = self.y_cell.borrow().seek(index)?;
        Ok((x, y))
    }

    /// Integrates both components with the same scheme and the given
    /// initial time, returning a function that shares the cached
    /// integral cells of this one.
    pub fn integrate(&self,
                     t_i: f64,
                     x_i: f64,
                     y_i: f64,
                     scheme: IntegrationScheme) -> Result<VectorFunction, FunctionError> {
        let x_integral = self.x_cell.borrow_mut().integral(scheme, t_i, x_i)?;
        let y_integral = self.y_cell.borrow_mut().integral(scheme, t_i, y_i)?;
        Ok(VectorFunction::from_cells(x_integral, y_integral))
    }

    /// Builds a VectorFunction from two independent coordinate sequences.
    pub fn from_sequence<I, J>(x_pairs: I, y_pairs: J) -> Result<VectorFunction, FunctionError> where
        I: IntoIterator<Item = (f64, f64)>,
        J: IntoIterator<Item = (f64, f64)> {
        Ok(VectorFunction::from_cells(
            Rc::new(RefCell::new(PiecewiseFunction::from_sequence(x_pairs)?)),
            Rc::new(RefCell::new(PiecewiseFunction::from_sequence(y_pairs)?))
        ))
    }
}
