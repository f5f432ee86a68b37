//! The pre-trained cancellation classifier.
//!
//! [`Classifier`] is the seam between the prediction adapter and whatever
//! model backs it. [`ModelArtifact`] is the production implementation: a
//! JSON document holding the feature schema and a fitted estimator, loaded
//! once at startup and shared read-only afterwards.
//!
//! Supported estimators:
//!
//! - `logistic_regression`: `P(cancelled) = sigmoid(intercept + coef . x)`
//! - `decision_tree`: threshold splits (`x <= t` goes left) ending in class weights
//! - `random_forest`: decision trees whose leaf distributions are averaged

use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, ClassifierError};
use crate::model::{BookingRecord, CancellationClass, ClassProbabilities};

/// A binary classifier over booking records.
pub trait Classifier: Send + Sync {
    /// Predicted class for the record.
    fn predict(&self, record: &BookingRecord) -> Result<CancellationClass, ClassifierError>;

    /// Distribution over both classes for the record.
    fn predict_proba(&self, record: &BookingRecord)
        -> Result<ClassProbabilities, ClassifierError>;
}

/// A serialized, fitted model together with the schema it was trained on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub trained_on: Option<NaiveDate>,
    /// Column names in the order the estimator indexes them.
    pub feature_names: Vec<String>,
    pub estimator: Estimator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    LogisticRegression {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    DecisionTree(DecisionTree),
    RandomForest {
        trees: Vec<DecisionTree>,
    },
}

impl Estimator {
    pub fn kind(&self) -> &'static str {
        match self {
            Estimator::LogisticRegression { .. } => "logistic_regression",
            Estimator::DecisionTree(_) => "decision_tree",
            Estimator::RandomForest { .. } => "random_forest",
        }
    }
}

/// A fitted tree stored as a flat node list rooted at index 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Class weights `[not_cancelled, cancelled]`, not necessarily normalised.
    Leaf { value: [f64; 2] },
}

impl DecisionTree {
    fn validate(&self, n_features: usize) -> Result<(), ArtifactError> {
        if self.nodes.is_empty() {
            return Err(ArtifactError::invalid("decision tree has no nodes"));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(ArtifactError::invalid(format!(
                            "node {idx} splits on feature {feature} but only {n_features} features are declared"
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(ArtifactError::invalid(format!(
                            "node {idx} has a NaN threshold"
                        )));
                    }
                    // Children strictly after the parent rule out cycles.
                    for child in [*left, *right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(ArtifactError::invalid(format!(
                                "node {idx} points to invalid child {child}"
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    let total = value[0] + value[1];
                    let valid = value.iter().all(|w| w.is_finite() && *w >= 0.0);
                    if !valid || !total.is_finite() || total <= 0.0 {
                        return Err(ArtifactError::invalid(format!(
                            "leaf {idx} has invalid class weights {value:?}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn predict_proba(&self, features: &[f64]) -> ClassProbabilities {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { value } => {
                    let total = value[0] + value[1];
                    return ClassProbabilities {
                        not_cancelled: value[0] / total,
                        cancelled: value[1] / total,
                    };
                }
            }
        }
    }
}

impl ModelArtifact {
    /// Reads and validates an artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let raw = read_to_string(path).map_err(|source| ArtifactError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: ModelArtifact =
            serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Checks the structural invariants inference relies on.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.feature_names.is_empty() {
            return Err(ArtifactError::invalid("artifact declares no features"));
        }
        let mut seen = HashSet::new();
        for name in &self.feature_names {
            if !seen.insert(name.as_str()) {
                return Err(ArtifactError::invalid(format!(
                    "feature '{name}' is declared more than once"
                )));
            }
        }

        let n_features = self.feature_names.len();
        match &self.estimator {
            Estimator::LogisticRegression {
                coefficients,
                intercept,
            } => {
                if coefficients.len() != n_features {
                    return Err(ArtifactError::invalid(format!(
                        "logistic regression has {} coefficients for {n_features} features",
                        coefficients.len()
                    )));
                }
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(ArtifactError::invalid(
                        "logistic regression weights must be finite",
                    ));
                }
            }
            Estimator::DecisionTree(tree) => tree.validate(n_features)?,
            Estimator::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(ArtifactError::invalid("random forest has no trees"));
                }
                for tree in trees {
                    tree.validate(n_features)?;
                }
            }
        }
        Ok(())
    }

    /// Feature names the artifact expects but a [`BookingRecord`] cannot supply.
    pub fn missing_features(&self) -> Vec<&str> {
        self.feature_names
            .iter()
            .map(String::as_str)
            .filter(|name| !BookingRecord::COLUMNS.contains(name))
            .collect()
    }

    /// Builds the estimator's input row by resolving every feature by name.
    fn feature_row(&self, record: &BookingRecord) -> Result<Vec<f64>, ClassifierError> {
        self.feature_names
            .iter()
            .map(|name| {
                let value =
                    record
                        .feature(name)
                        .ok_or_else(|| ClassifierError::SchemaMismatch {
                            feature: name.clone(),
                        })?;
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(ClassifierError::NonFiniteFeature {
                        feature: name.clone(),
                    })
                }
            })
            .collect()
    }

    fn decision_function(coefficients: &[f64], intercept: f64, row: &[f64]) -> f64 {
        coefficients
            .iter()
            .zip(row)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + intercept
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for ModelArtifact {
    fn predict(&self, record: &BookingRecord) -> Result<CancellationClass, ClassifierError> {
        match &self.estimator {
            Estimator::LogisticRegression {
                coefficients,
                intercept,
            } => {
                let row = self.feature_row(record)?;
                let z = Self::decision_function(coefficients, *intercept, &row);
                Ok(if z > 0.0 {
                    CancellationClass::Cancelled
                } else {
                    CancellationClass::NotCancelled
                })
            }
            Estimator::DecisionTree(_) | Estimator::RandomForest { .. } => {
                let probabilities = self.predict_proba(record)?;
                Ok(CancellationClass::from_probabilities(&probabilities))
            }
        }
    }

    fn predict_proba(
        &self,
        record: &BookingRecord,
    ) -> Result<ClassProbabilities, ClassifierError> {
        let row = self.feature_row(record)?;
        let probabilities = match &self.estimator {
            Estimator::LogisticRegression {
                coefficients,
                intercept,
            } => ClassProbabilities::from_cancelled(sigmoid(Self::decision_function(
                coefficients,
                *intercept,
                &row,
            ))),
            Estimator::DecisionTree(tree) => tree.predict_proba(&row),
            Estimator::RandomForest { trees } => {
                let n = trees.len() as f64;
                let (not_cancelled, cancelled) =
                    trees.iter().fold((0.0, 0.0), |(nc, c), tree| {
                        let p = tree.predict_proba(&row);
                        (nc + p.not_cancelled, c + p.cancelled)
                    });
                ClassProbabilities {
                    not_cancelled: not_cancelled / n,
                    cancelled: cancelled / n,
                }
            }
        };
        Ok(probabilities)
    }
}
