use std::io::Write;

use assert_matches::assert_matches;
use dash_mnlistdiff::blockdata::transaction::special_transaction::coinbase::CoinbasePayload;
use dash_mnlistdiff::blockdata::transaction::special_transaction::quorum_commitment::QuorumFinalizationCommitment;
use dash_mnlistdiff::consensus::{deserialize, serialize_hex};
use dash_mnlistdiff::hashes::Hash;
use dash_mnlistdiff::sml::deterministic::DeterministicMasternode;
use dash_mnlistdiff::sml::llmq_type::LLMQType;
use dash_mnlistdiff::sml::masternode_list_entry::EntryMasternodeType;
use dash_mnlistdiff::{
    BLSSignature, Block, BlockHash, MnListDiff, Network, ProTxHash, QuorumHash, SmlError,
};
use mnlistdiff_cli::fixture::{
    Fixture, FixtureBlock, FixtureMasternode, FixtureMasternodeList, FixturePlatform, FixtureQuorum,
};
use mnlistdiff_cli::{CliError, Config, OutputFormat, run};
use tempfile::NamedTempFile;

fn fixture_masternode(mn: &DeterministicMasternode) -> FixtureMasternode {
    let platform = match &mn.mn_type {
        EntryMasternodeType::Regular => None,
        EntryMasternodeType::HighPerformance { platform_http_port, platform_node_id } => {
            Some(FixturePlatform {
                http_port: *platform_http_port,
                node_id: platform_node_id.to_string(),
            })
        }
    };
    FixtureMasternode {
        pro_tx_hash: mn.pro_tx_hash.to_string(),
        platform,
        state_version: mn.state.version,
        registered_height: mn.state.registered_height,
        pose_ban_height: mn.state.pose_ban_height,
        confirmed_hash: mn.state.confirmed_hash.to_string(),
        service: mn.state.service.to_string(),
        pub_key_operator: mn.state.pub_key_operator.to_string(),
        key_id_voting: mn.state.key_id_voting.to_string(),
        payout_script: mn.state.script_payout.to_string(),
        operator_payout_script: mn.state.script_operator_payout.to_string(),
    }
}

/// 30 blocks; masternode 1 from genesis, evo masternode 2 from height 10 and
/// a test quorum based on block 20.
fn fixture() -> Fixture {
    let blocks = (0..30)
        .map(|h| FixtureBlock {
            hash: BlockHash::dummy(h).to_string(),
            block: serialize_hex(&Block::dummy_with_coinbase(
                h,
                CoinbasePayload::dummy(h, BLSSignature::zeroed()),
                1,
            )),
        })
        .collect();
    let commitment =
        QuorumFinalizationCommitment::dummy(LLMQType::LlmqtypeTest, QuorumHash::dummy(20), 0);

    Fixture {
        network: Some(Network::Regtest),
        v20_activation_height: None,
        blocks,
        stale_blocks: vec![],
        masternode_lists: vec![
            FixtureMasternodeList {
                height: 0,
                masternodes: vec![fixture_masternode(&DeterministicMasternode::dummy(1))],
            },
            FixtureMasternodeList {
                height: 10,
                masternodes: vec![
                    fixture_masternode(&DeterministicMasternode::dummy(1)),
                    fixture_masternode(&DeterministicMasternode::dummy_evo(2)),
                ],
            },
        ],
        quorums: vec![FixtureQuorum {
            commitment: serialize_hex(&commitment),
            base_height: 20,
            mined_height: 22,
            inactive_from: None,
        }],
    }
}

fn write_fixture(fixture: &Fixture) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(fixture).unwrap().as_bytes()).unwrap();
    file
}

#[test]
fn json_output_for_full_list() {
    let file = write_fixture(&fixture());
    let output = run(&Config::new(file.path()).with_extended(true)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["baseBlockHash"], "0".repeat(64));
    assert_eq!(json["blockHash"], BlockHash::dummy(29).to_string());
    // The zero base resolves to genesis, which already lists masternode 1.
    assert_eq!(json["mnList"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["mnList"][0]["proRegTxHash"], ProTxHash::dummy(2).to_string());
    assert_eq!(json["mnList"][0]["platformHTTPPort"], 443);
    assert_eq!(json["newQuorums"].as_array().map(Vec::len), Some(1));
    assert!(json["mnList"][0].get("payoutAddress").is_some());
    assert!(json.get("quorumsCLSigs").is_some());
}

#[test]
fn hex_output_between_blocks() {
    let file = write_fixture(&fixture());
    let config = Config::new(file.path())
        .with_base_block_hash(BlockHash::dummy(5))
        .with_block_hash(BlockHash::dummy(15))
        .with_output(OutputFormat::Hex);
    let output = run(&config).unwrap();

    let diff: MnListDiff = deserialize(&hex::decode(output).unwrap()).unwrap();
    assert_eq!(diff.base_block_hash, BlockHash::dummy(5));
    assert_eq!(diff.new_masternodes.len(), 1);
    assert!(diff.new_masternodes[0].mn_type.is_high_performance());
    assert!(diff.new_quorums.is_empty());
}

#[test]
fn v20_override_disables_chainlock_info() {
    let file = write_fixture(&fixture());
    let output = run(&Config::new(file.path()).with_v20_activation_height(1000)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert!(json.get("quorumsCLSigs").is_none());
}

#[test]
fn unknown_block_is_a_diff_error() {
    let file = write_fixture(&fixture());
    let unknown = BlockHash::from_byte_array([0xab; 32]);
    assert_matches!(
        run(&Config::new(file.path()).with_block_hash(unknown)),
        Err(CliError::Diff(SmlError::BlockNotFound(hash))) if hash == unknown
    );
}

#[test]
fn quorum_must_be_based_on_its_block() {
    let mut fixture = fixture();
    fixture.quorums[0].base_height = 21;
    let file = write_fixture(&fixture);
    assert_matches!(run(&Config::new(file.path())), Err(CliError::InvalidFixture(_)));
}

#[test]
fn broken_fixtures_are_reported() {
    assert_matches!(
        run(&Config::new("/nonexistent/chain.json")),
        Err(CliError::FixtureRead { .. })
    );

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"{ \"blocks\": 3 }").unwrap();
    assert_matches!(run(&Config::new(file.path())), Err(CliError::Json(_)));

    let mut fixture = fixture();
    fixture.blocks[3].block = "00".to_string();
    let file = write_fixture(&fixture);
    assert_matches!(run(&Config::new(file.path())), Err(CliError::Decode { .. }));

    let file = write_fixture(&Fixture::default());
    assert_matches!(run(&Config::new(file.path())), Err(CliError::EmptyChain));
}
