use crate::domain::errors::ForecastError;
use crate::domain::ports::Regressor;
use ndarray::{Array, Array1, Array2, ArrayView1, Axis, Dimension, Zip};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct MlpParameters {
    pub hidden_units: usize,
    pub learning_rate: f64,
    pub batch_size: usize,
    pub seed: u64,
}

impl Default for MlpParameters {
    fn default() -> Self {
        Self {
            hidden_units: 64,
            learning_rate: 0.001,
            batch_size: 16,
            seed: 42,
        }
    }
}

/// First and second moment estimates for one parameter tensor.
struct Moments<D: Dimension> {
    m: Array<f64, D>,
    v: Array<f64, D>,
}

impl<D: Dimension> Moments<D> {
    fn zeros_like(param: &Array<f64, D>) -> Self {
        Self {
            m: Array::zeros(param.raw_dim()),
            v: Array::zeros(param.raw_dim()),
        }
    }
}

struct Adam {
    learning_rate: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    step: i32,
}

impl Adam {
    fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-7,
            step: 0,
        }
    }

    fn tick(&mut self) {
        self.step += 1;
    }

    fn apply<D: Dimension>(
        &self,
        param: &mut Array<f64, D>,
        grad: &Array<f64, D>,
        moments: &mut Moments<D>,
    ) {
        let (b1, b2) = (self.beta1, self.beta2);
        let bias1 = 1.0 - b1.powi(self.step);
        let bias2 = 1.0 - b2.powi(self.step);
        let lr = self.learning_rate;
        let eps = self.epsilon;

        Zip::from(param)
            .and(grad)
            .and(&mut moments.m)
            .and(&mut moments.v)
            .for_each(|p, &g, m, v| {
                *m = b1 * *m + (1.0 - b1) * g;
                *v = b2 * *v + (1.0 - b2) * g * g;
                let m_hat = *m / bias1;
                let v_hat = *v / bias2;
                *p -= lr * m_hat / (v_hat.sqrt() + eps);
            });
    }
}

/// Fitted weights: `input -> ReLU(hidden) -> sigmoid scalar`.
///
/// Targets are min-max normalized, so the sigmoid keeps every prediction
/// inside the normalized training range `(0, 1)`.
struct Weights {
    w1: Array2<f64>,
    b1: Array1<f64>,
    w2: Array1<f64>,
    b2: Array1<f64>,
}

impl Weights {
    fn init(inputs: usize, hidden: usize, rng: &mut StdRng) -> Self {
        let limit1 = (6.0 / inputs as f64).sqrt();
        let limit2 = (6.0 / (hidden + 1) as f64).sqrt();
        Self {
            w1: Array2::from_shape_fn((inputs, hidden), |_| rng.random_range(-limit1..limit1)),
            b1: Array1::zeros(hidden),
            w2: Array1::from_shape_fn(hidden, |_| rng.random_range(-limit2..limit2)),
            b2: Array1::zeros(1),
        }
    }

    /// Returns (pre-activation, hidden activation, output) for a batch.
    fn forward(&self, x: &Array2<f64>) -> (Array2<f64>, Array2<f64>, Array1<f64>) {
        let z1 = x.dot(&self.w1) + &self.b1;
        let a1 = z1.mapv(relu);
        let out = (a1.dot(&self.w2) + self.b2[0]).mapv(sigmoid);
        (z1, a1, out)
    }

    fn forward_one(&self, x: ArrayView1<f64>) -> f64 {
        let a1 = (self.w1.t().dot(&x) + &self.b1).mapv(relu);
        sigmoid(a1.dot(&self.w2) + self.b2[0])
    }
}

fn relu(z: f64) -> f64 {
    z.max(0.0)
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Small feed-forward regressor trained with mini-batch Adam on MSE.
///
/// Adam keeps per-parameter first and second moments with bias correction.
pub struct MlpRegressor {
    params: MlpParameters,
    weights: Option<Weights>,
}

impl MlpRegressor {
    pub fn new(params: MlpParameters) -> Self {
        Self {
            params,
            weights: None,
        }
    }

    /// Mean squared error of the fitted model on the given data.
    pub fn mse(&self, inputs: &[Vec<f64>], targets: &[f64]) -> Result<f64, ForecastError> {
        if targets.is_empty() {
            return Ok(0.0);
        }
        let mut total = 0.0;
        for (row, &target) in inputs.iter().zip(targets.iter()) {
            let err = self.predict_one(row)? - target;
            total += err * err;
        }
        Ok(total / targets.len() as f64)
    }

    fn to_matrix(inputs: &[Vec<f64>]) -> Result<Array2<f64>, ForecastError> {
        let rows = inputs.len();
        let cols = inputs.first().map(|r| r.len()).unwrap_or(0);
        if cols == 0 || inputs.iter().any(|r| r.len() != cols) {
            return Err(ForecastError::Model(
                "Input rows must share a non-zero width".to_string(),
            ));
        }
        let flat: Vec<f64> = inputs.iter().flatten().copied().collect();
        Array2::from_shape_vec((rows, cols), flat)
            .map_err(|e| ForecastError::Model(format!("Matrix creation failed: {}", e)))
    }
}

impl Regressor for MlpRegressor {
    fn fit(
        &mut self,
        inputs: &[Vec<f64>],
        targets: &[f64],
        epochs: usize,
    ) -> Result<(), ForecastError> {
        if inputs.is_empty() || inputs.len() != targets.len() {
            return Err(ForecastError::Model(format!(
                "Expected matching non-empty inputs and targets, got {} and {}",
                inputs.len(),
                targets.len()
            )));
        }

        let x = Self::to_matrix(inputs)?;
        let y = Array1::from(targets.to_vec());
        let n = x.nrows();
        let batch_size = self.params.batch_size.max(1);

        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let mut weights = Weights::init(x.ncols(), self.params.hidden_units.max(1), &mut rng);
        let mut m_w1 = Moments::zeros_like(&weights.w1);
        let mut m_b1 = Moments::zeros_like(&weights.b1);
        let mut m_w2 = Moments::zeros_like(&weights.w2);
        let mut m_b2 = Moments::zeros_like(&weights.b2);
        let mut adam = Adam::new(self.params.learning_rate);

        let mut order: Vec<usize> = (0..n).collect();

        for epoch in 0..epochs {
            order.shuffle(&mut rng);
            let mut epoch_loss = 0.0;

            for batch in order.chunks(batch_size) {
                let xb = x.select(Axis(0), batch);
                let yb = y.select(Axis(0), batch);
                let (z1, a1, out) = weights.forward(&xb);

                let diff = &out - &yb;
                epoch_loss += diff.mapv(|d| d * d).sum();

                // d(mean squared error)/d(pre-sigmoid output)
                let d_out = diff * (2.0 / batch.len() as f64) * out.mapv(|o| o * (1.0 - o));

                let grad_w2 = a1.t().dot(&d_out);
                let grad_b2 = Array1::from_elem(1, d_out.sum());

                let d_a1 = d_out
                    .view()
                    .insert_axis(Axis(1))
                    .dot(&weights.w2.view().insert_axis(Axis(0)));
                let d_z1 = d_a1 * z1.mapv(|z| if z > 0.0 { 1.0 } else { 0.0 });
                let grad_w1 = xb.t().dot(&d_z1);
                let grad_b1 = d_z1.sum_axis(Axis(0));

                adam.tick();
                adam.apply(&mut weights.w1, &grad_w1, &mut m_w1);
                adam.apply(&mut weights.b1, &grad_b1, &mut m_b1);
                adam.apply(&mut weights.w2, &grad_w2, &mut m_w2);
                adam.apply(&mut weights.b2, &grad_b2, &mut m_b2);
            }

            debug!(
                "MLP epoch {}/{}: loss={:.6}",
                epoch + 1,
                epochs,
                epoch_loss / n as f64
            );
        }

        self.weights = Some(weights);
        Ok(())
    }

    fn predict_one(&self, input: &[f64]) -> Result<f64, ForecastError> {
        let weights = self.weights.as_ref().ok_or(ForecastError::NotTrained)?;
        if input.len() != weights.w1.nrows() {
            return Err(ForecastError::Model(format!(
                "Expected input of width {}, got {}",
                weights.w1.nrows(),
                input.len()
            )));
        }
        Ok(weights.forward_one(ArrayView1::from(input)))
    }

    fn name(&self) -> &str {
        "Feed-forward MLP"
    }
}
