//! Cross-module test suites: the prediction laws and the sampled series.

mod prediction_tests;
