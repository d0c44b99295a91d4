use fold_predict::{
    CliConfig, ConfidenceLevel, EsmFoldPipeline, FoldEngine, FoldError, LocalStorage,
};
use httpmock::prelude::*;
use tempfile::TempDir;

fn atom_line(serial: i32, name: &str, residue: &str, chain: char, index: i32, b: f64) -> String {
    format!(
        "ATOM  {:>5} {:<4}{}{:<3} {}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
        serial, name, " ", residue, chain, index, " ", 1.0, 2.0, 3.0, 1.0, b, "N"
    )
}

// 模擬 ESMFold 回傳的小型結構：三個殘基，不同信心值
fn mock_pdb() -> String {
    let mut lines = vec!["HEADER    ESMFOLD V1 PREDICTION".to_string()];
    lines.push(atom_line(1, "N", "MET", 'A', 1, 95.0));
    lines.push(atom_line(2, "CA", "MET", 'A', 1, 95.0));
    lines.push(atom_line(3, "N", "LYS", 'A', 2, 75.0));
    lines.push(atom_line(4, "CA", "LYS", 'A', 2, 75.0));
    lines.push(atom_line(5, "N", "VAL", 'A', 3, 40.0));
    lines.push(atom_line(6, "CA", "VAL", 'A', 3, 40.0));
    lines.push("TER".to_string());
    lines.push("END".to_string());
    lines.join("\n")
}

fn test_config(endpoint: String, output_path: String, sequence: &str) -> CliConfig {
    CliConfig {
        sequence: Some(sequence.to_string()),
        sequence_file: None,
        example: false,
        endpoint,
        output_path,
        retry_attempts: 1,
        retry_delay: 0,
        timeout: 30,
        config: None,
        verbose: false,
        monitor: false,
    }
}

#[tokio::test]
async fn test_end_to_end_prediction_with_mock_service() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/fold")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("MKV");
        then.status(200).body(mock_pdb());
    });

    let config = test_config(server.url("/fold"), output_path.clone(), "MKV");
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = EsmFoldPipeline::new(storage, config);
    let engine = FoldEngine::new_with_monitoring(pipeline, false);

    let outcome = engine.run().await.unwrap();

    api_mock.assert();

    // 平均：(95*2 + 75*2 + 40*2) / 6 = 70.0 → Confident
    assert_eq!(outcome.analysis.mean_plddt, 70.0);
    assert_eq!(outcome.analysis.confidence, ConfidenceLevel::Confident);
    assert_eq!(outcome.analysis.sequence_length, 3);
    assert_eq!(outcome.analysis.residues.len(), 3);
    assert!(outcome.output_path.contains("fold_output.zip"));

    // 所有輸出檔都應該存在
    for name in ["predicted.pdb", "plddt.csv", "summary.json", "fold_output.zip"] {
        assert!(
            std::path::Path::new(&output_path).join(name).exists(),
            "missing {}",
            name
        );
    }

    // predicted.pdb 保留原始座標文字
    let pdb_text =
        std::fs::read_to_string(std::path::Path::new(&output_path).join("predicted.pdb")).unwrap();
    assert_eq!(pdb_text, mock_pdb());

    // bundle 內含全部三個報告檔
    let zip_data =
        std::fs::read(std::path::Path::new(&output_path).join("fold_output.zip")).unwrap();
    let cursor = std::io::Cursor::new(zip_data);
    let mut archive = zip::ZipArchive::new(cursor).unwrap();
    assert_eq!(archive.len(), 3);

    let mut csv_file = archive.by_name("plddt.csv").unwrap();
    let mut csv_content = String::new();
    std::io::Read::read_to_string(&mut csv_file, &mut csv_content).unwrap();
    assert!(csv_content.contains("MET"));
    assert!(csv_content.contains("95.0"));
}

#[tokio::test]
async fn test_summary_json_is_deterministic_for_same_response() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/fold");
        then.status(200).body(mock_pdb());
    });

    let config = test_config(server.url("/fold"), output_path.clone(), "MKV");
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = EsmFoldPipeline::new(storage, config);
    let engine = FoldEngine::new(pipeline);

    let first = engine.run().await.unwrap();
    let second = engine.run().await.unwrap();

    assert_eq!(first.analysis.mean_plddt, second.analysis.mean_plddt);
    assert_eq!(first.analysis.residues, second.analysis.residues);

    let summary: serde_json::Value = serde_json::from_slice(
        &std::fs::read(std::path::Path::new(&output_path).join("summary.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(summary["mean_plddt"], 70.0);
    assert_eq!(summary["confidence"], "Confident");
    assert_eq!(summary["residue_count"], 3);
}

#[tokio::test]
async fn test_invalid_sequence_never_reaches_the_service() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/fold");
        then.status(200).body(mock_pdb());
    });

    // 含數字的序列在 extract 前就被拒絕
    let config = test_config(server.url("/fold"), output_path.clone(), "MKV42");
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = EsmFoldPipeline::new(storage, config);
    let engine = FoldEngine::new(pipeline);

    let result = engine.run().await;

    assert!(matches!(result, Err(FoldError::ValidationError { .. })));
    api_mock.assert_hits(0);
    assert!(!std::path::Path::new(&output_path)
        .join("predicted.pdb")
        .exists());
}

#[tokio::test]
async fn test_retry_loop_hits_service_fixed_number_of_times() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/fold");
        then.status(502);
    });

    let mut config = test_config(server.url("/fold"), output_path.clone(), "MKV");
    config.retry_attempts = 3;
    config.retry_delay = 0;

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = EsmFoldPipeline::new(storage, config);
    let engine = FoldEngine::new(pipeline);

    let result = engine.run().await;

    api_mock.assert_hits(3);
    assert!(matches!(
        result,
        Err(FoldError::ApiStatusError { status: 502 })
    ));
}

#[tokio::test]
async fn test_service_returning_garbage_is_a_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/fold");
        then.status(200).body("INTERNAL SERVER ERROR");
    });

    let config = test_config(server.url("/fold"), output_path.clone(), "MKV");
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = EsmFoldPipeline::new(storage, config);
    let engine = FoldEngine::new(pipeline);

    let result = engine.run().await;

    api_mock.assert();
    assert!(matches!(result, Err(FoldError::ParseError { .. })));
}
