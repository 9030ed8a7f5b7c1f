use std::cell::RefCell;
use std::rc::Rc;

use crate::graph::functionerror::FunctionError;
use crate::graph::integrationscheme::IntegrationScheme;

// ─────────────────────────────────────────────
// Point2D
// ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    x: f64,
    y: f64
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn slope(lhs_pt: &Point2D, rhs_pt: &Point2D) -> f64 {
        (rhs_pt.y - lhs_pt.y) / (rhs_pt.x - lhs_pt.x)
    }
}

/// 支援負索引（由尾端往回數）。超出範圍時回傳 None。
fn resolve_index(index: isize, len: usize) -> Option<usize> {
    if index < 0 {
        len.checked_sub(index.unsigned_abs())
    } else if (index as usize) < len {
        Some(index as usize)
    } else {
        None
    }
}

// ─────────────────────────────────────────────
// PiecewiseFunction
// ─────────────────────────────────────────────
//
// 以 (x, y) 節點序列表示的一維函數，節點間線性內插，
// 範圍外沿最接近的邊界區段外插。
//
// 積分快取：integral() 建立後由此函數維護。
//   尾端插入 → 以同一積分法追加一個積分節點（攤銷 O(1)）
//   非尾端插入 → 以原始種子節點與積分法整段重建（O(n)）
// 快取以 Rc<RefCell<..>> 與呼叫端共享，重建採原地覆寫，
// 所有持有者都會看到更新後的資料。

#[derive(Clone)]
struct IntegralCache {
    function: Rc<RefCell<PiecewiseFunction>>,
    scheme: IntegrationScheme
}

#[derive(Default)]
pub struct PiecewiseFunction {
    points: Vec<Point2D>,
    integral: Option<IntegralCache>
}

impl PiecewiseFunction {
    pub fn new() -> PiecewiseFunction {
        PiecewiseFunction { points: Vec::new(), integral: None }
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// x 的排序插入位置（等值點取最左）。
    fn partition_index(&self, x: f64) -> usize {
        self.points.partition_point(|pt| pt.x() < x)
    }

    /// 求給定 x 的 y 值。
    ///
    /// 只有一個節點時整條函數視為水平線；落在既有節點上時
    /// 直接回傳儲存的 y；其餘情況取包夾區段線性內插，
    /// 範圍外取最近邊界區段的斜率外插。
    pub fn evaluate(&self, x: f64) -> Result<f64, FunctionError> {
        let first = *self.points.first().ok_or(FunctionError::EmptyFunction)?;

        if self.points.len() == 1 {
            return Ok(first.y());
        }

        let last = self.points.len() - 1;
        let index = if x > self.points[last].x() {
            last
        } else if x < first.x() {
            1
        } else {
            let found = self.partition_index(x);
            if self.points[found].x() == x {
                return Ok(self.points[found].y());
            }
            found.max(1)
        };

        let a = self.points[index - 1];
        let b = self.points[index];

        Ok(Point2D::slope(&a, &b) * (x - a.x()) + a.y())
    }

    /// 插入 (x, y) 並維護積分快取。
    ///
    /// check_duplicate 為 true 且 x 已存在時回傳 DuplicatePoint。
    pub fn insert(&mut self, x: f64, y: f64, check_duplicate: bool) -> Result<(), FunctionError> {
        if check_duplicate && self.points.iter().any(|pt| pt.x() == x) {
            return Err(FunctionError::DuplicatePoint(x));
        }

        let index = self.partition_index(x);
        self.points.insert(index, Point2D::new(x, y));

        if let Some(cache) = self.integral.clone() {
            if index + 1 == self.points.len() {
                // 僅在新節點超出積分函數既有範圍時追加；
                // pop 後於同一 x 重插（取代尾端樣本）不屬於新步。
                let covered = cache.function.borrow().seek(-1)?.x();
                if x > covered {
                    let dx = if self.points.len() > 1 {
                        self.points[index].x() - self.points[index - 1].x()
                    } else {
                        0.0
                    };
                    let mut integral = cache.function.borrow_mut();
                    cache.scheme.append_sample(&mut integral, self, dx)?;
                }
            } else {
                let seed = cache.function.borrow().seek(0)?;
                let rebuilt = self.build_integral(cache.scheme, seed.x(), seed.y())?;
                *cache.function.borrow_mut() = rebuilt;
            }
        }

        Ok(())
    }

    /// 以最後一個節點為基準插入 (last.x + dx, last.y + dy)。
    pub fn append(&mut self, dx: f64, dy: f64) -> Result<(), FunctionError> {
        let last = *self.points.last().ok_or(FunctionError::EmptyFunction)?;
        self.insert(last.x() + dx, last.y() + dy, false)
    }

    /// 移除並回傳指定索引的節點。不更新積分快取。
    pub fn pop(&mut self, index: isize) -> Result<Point2D, FunctionError> {
        if self.points.is_empty() {
            return Err(FunctionError::EmptyFunction);
        }
        let resolved = resolve_index(index, self.points.len())
            .ok_or(FunctionError::IndexOutOfRange { index, len: self.points.len() })?;
        Ok(self.points.remove(resolved))
    }

    /// 唯讀取得指定索引的節點。
    pub fn seek(&self, index: isize) -> Result<Point2D, FunctionError> {
        resolve_index(index, self.points.len())
            .map(|resolved| self.points[resolved])
            .ok_or(FunctionError::IndexOutOfRange { index, len: self.points.len() })
    }

    fn build_integral(&self,
                      scheme: IntegrationScheme,
                      x_i: f64,
                      y_i: f64) -> Result<PiecewiseFunction, FunctionError> {
        let mut integral = PiecewiseFunction::new();
        integral.insert(x_i, y_i, false)?;

        for i in 1..self.points.len() {
            let dx = self.points[i].x() - self.points[i - 1].x();
            scheme.append_sample(&mut integral, self, dx)?;
        }

        Ok(integral)
    }

    /// 建立並快取以 (x_i, y_i) 為初始條件的積分函數。
    ///
    /// 回傳的 Rc 與快取共享同一份資料：之後對本函數的尾端
    /// 插入會直接反映在持有者手上的積分函數中。
    pub fn integral(&mut self,
                    scheme: IntegrationScheme,
                    x_i: f64,
                    y_i: f64) -> Result<Rc<RefCell<PiecewiseFunction>>, FunctionError> {
        let function = Rc::new(RefCell::new(self.build_integral(scheme, x_i, y_i)?));
        self.integral = Some(IntegralCache { function: Rc::clone(&function), scheme });
        Ok(function)
    }

    /// 由任意順序的 (x, y) 序列建立函數，結果依 x 排序。
    pub fn from_sequence<I>(pairs: I) -> Result<PiecewiseFunction, FunctionError> where
        I: IntoIterator<Item = (f64, f64)> {
        let mut output = PiecewiseFunction::new();
        for (x, y) in pairs {
            output.insert(x, y, false)?;
        }
        Ok(output)
    }
}
