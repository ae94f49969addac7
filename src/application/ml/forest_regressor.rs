use crate::domain::errors::ForecastError;
use crate::domain::ports::Regressor;
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

#[derive(Debug, Clone, PartialEq)]
pub struct ForestParameters {
    pub n_trees: usize,
    pub max_depth: u16,
    pub min_split: usize,
}

impl Default for ForestParameters {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_split: 2,
        }
    }
}

/// Random forest backed by smartcore. Tree ensembles have no epoch loop, so
/// `epochs` is ignored. Predictions are averages of training targets and
/// therefore stay inside the normalized training range.
pub struct ForestRegressor {
    params: ForestParameters,
    model: Option<RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>>,
}

impl ForestRegressor {
    pub fn new(params: ForestParameters) -> Self {
        Self {
            params,
            model: None,
        }
    }
}

impl Regressor for ForestRegressor {
    fn fit(
        &mut self,
        inputs: &[Vec<f64>],
        targets: &[f64],
        _epochs: usize,
    ) -> Result<(), ForecastError> {
        if inputs.is_empty() || inputs.len() != targets.len() {
            return Err(ForecastError::Model(format!(
                "Expected matching non-empty inputs and targets, got {} and {}",
                inputs.len(),
                targets.len()
            )));
        }

        let x = DenseMatrix::from_2d_vec(&inputs.to_vec())
            .map_err(|e| ForecastError::Model(format!("Matrix creation failed: {}", e)))?;
        let y = targets.to_vec();

        let params = RandomForestRegressorParameters::default()
            .with_n_trees(self.params.n_trees)
            .with_max_depth(self.params.max_depth)
            .with_min_samples_split(self.params.min_split);

        let model = RandomForestRegressor::fit(&x, &y, params)
            .map_err(|e| ForecastError::Model(format!("Training failed: {}", e)))?;

        self.model = Some(model);
        Ok(())
    }

    fn predict_one(&self, input: &[f64]) -> Result<f64, ForecastError> {
        let model = self.model.as_ref().ok_or(ForecastError::NotTrained)?;

        let input_matrix = DenseMatrix::from_2d_vec(&vec![input.to_vec()])
            .map_err(|e| ForecastError::Model(format!("Matrix creation failed: {}", e)))?;

        let predictions = model
            .predict(&input_matrix)
            .map_err(|e| ForecastError::Model(format!("Prediction failed: {}", e)))?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| ForecastError::Model("No prediction returned".to_string()))
    }

    fn name(&self) -> &str {
        "SmartCore Random Forest"
    }
}
