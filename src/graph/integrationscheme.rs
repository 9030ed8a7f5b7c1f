use crate::graph::functionerror::FunctionError;
use crate::graph::piecewisefunction::PiecewiseFunction;

// ─────────────────────────────────────────────
// 積分法
// ─────────────────────────────────────────────
//
// 每種方法接收導函數 d、已累積到目前節點的積分函數 f 與步長 dx，
// 對 f 追加「一個增量節點」（而非絕對值），以保持跨節點累加時
// 浮點誤差不被放大。
//
// 積分區間的右緣一律取 f 最後節點的 x 加上 dx：尾端追加與整段
// 重建因此走完全相同的數值路徑，結果位元相等。

/// 以 f 的最後一個 x 為基準的積分區間右緣。
fn right_edge(f: &PiecewiseFunction, dx: f64) -> Result<f64, FunctionError> {
    Ok(f.seek(-1)?.x() + dx)
}

/// Euler：增量 = dx * d(f 最後節點的 x)。
fn integrate_euler(f: &mut PiecewiseFunction,
                   derivative: &PiecewiseFunction,
                   dx: f64) -> Result<(), FunctionError> {
    let x = f.seek(-1)?.x();
    let area = dx * derivative.evaluate(x)?;
    f.append(dx, area)
}

/// 梯形法：增量 = Σ width/2 * (d(x - width) + d(x))，
/// 由右緣往回每次退一個子區間寬度。splits 越多越精確。
fn integrate_trapezoidal(f: &mut PiecewiseFunction,
                         derivative: &PiecewiseFunction,
                         dx: f64,
                         splits: usize) -> Result<(), FunctionError> {
    let width = dx / splits as f64;
    let mut x = right_edge(f, dx)?;

    let mut area = 0.0;
    for _ in 0..splits {
        area += (width / 2.0) * (derivative.evaluate(x - width)? + derivative.evaluate(x)?);
        x -= width;
    }

    f.append(dx, area)
}

/// Runge-Kutta 4：k2 與 k3 都取區間中點（導函數不依賴積分值，
/// 中點斜率只需估一次）。對三次以下多項式導函數為精確積分。
fn integrate_rk4(f: &mut PiecewiseFunction,
                 derivative: &PiecewiseFunction,
                 dx: f64) -> Result<(), FunctionError> {
    let x = right_edge(f, dx)? - dx;

    let k1 = derivative.evaluate(x)?;
    let k2 = derivative.evaluate(x + dx / 2.0)?;
    let k3 = k2;
    let k4 = derivative.evaluate(x + dx)?;

    f.append(dx, dx / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationScheme {
    Euler,
    Trapezoidal,
    RungeKutta4
}

impl IntegrationScheme {
    /// 以選定的方法對積分函數 f 追加一個節點。f 必須已有種子節點。
    pub(crate) fn append_sample(&self,
                                f: &mut PiecewiseFunction,
                                derivative: &PiecewiseFunction,
                                dx: f64) -> Result<(), FunctionError> {
        match self {
            IntegrationScheme::Euler       => integrate_euler(f, derivative, dx),
            IntegrationScheme::Trapezoidal => integrate_trapezoidal(f, derivative, dx, 1),
            IntegrationScheme::RungeKutta4 => integrate_rk4(f, derivative, dx),
        }
    }
}
