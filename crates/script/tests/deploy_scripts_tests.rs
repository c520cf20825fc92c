use alloy_primitives::{I256, U256};
use alloy_sol_types::SolValue;
use fund_me_scripts::consts::{
    NetworkRegistry, DEFAULT_CONFIRMATIONS, FUND_ME_CONTRACT, MOCK_AGGREGATOR_CONTRACT, MOCK_DECIMALS,
    MOCK_INITIAL_ANSWER,
};
use fund_me_scripts::deployer::SignerAccounts;
use fund_me_scripts::scripts::{deploy_fund_me, deploy_mocks};

mod test_utils;
use test_utils::{
    dev_network, empty_registry, live_network, sepolia_registry, FakeDeployer, FakeVerifier, DEPLOYED_AT,
    DEPLOYER_ADDRESS, MOCK_FEED, SEPOLIA_CHAIN_ID, SEPOLIA_FEED,
};

fn accounts() -> SignerAccounts {
    SignerAccounts::new(DEPLOYER_ADDRESS)
}

mod price_feed_resolution {
    use super::*;

    #[tokio::test]
    async fn development_chain_uses_the_mock_registry() {
        let deployer = FakeDeployer::default().with_prior(MOCK_AGGREGATOR_CONTRACT, MOCK_FEED);
        let verifier = FakeVerifier::default();

        // The registry is empty on purpose: a development chain deployment
        // must succeed without ever consulting the network config.
        let deployed = deploy_fund_me::deploy_and_verify(
            &dev_network(),
            &empty_registry(),
            &accounts(),
            &deployer,
            Some(&verifier),
        )
        .await
        .expect("Failed to deploy on development chain");

        assert_eq!(deployed.address, DEPLOYED_AT);
        assert_eq!(deployer.recorded_gets(), vec![MOCK_AGGREGATOR_CONTRACT.to_owned()]);

        let deploys = deployer.recorded_deploys();
        assert_eq!(deploys.len(), 1);
        let (name, options) = &deploys[0];
        assert_eq!(name, FUND_ME_CONTRACT);
        assert_eq!(options.constructor_args, MOCK_FEED.abi_encode());
        assert_eq!(options.from, DEPLOYER_ADDRESS);
        assert_eq!(options.confirmations, DEFAULT_CONFIRMATIONS);

        // Development chains never verify, credential or not.
        assert!(verifier.recorded_calls().is_empty());
    }

    #[tokio::test]
    async fn live_network_uses_the_configured_feed() {
        let deployer = FakeDeployer::default();

        deploy_fund_me::deploy_and_verify(
            &live_network(),
            &sepolia_registry(SEPOLIA_FEED, Some(6)),
            &accounts(),
            &deployer,
            None::<&FakeVerifier>,
        )
        .await
        .expect("Failed to deploy on live network");

        // The mock registry must not be consulted on a live network.
        assert!(deployer.recorded_gets().is_empty());

        let deploys = deployer.recorded_deploys();
        assert_eq!(deploys.len(), 1);
        let (name, options) = &deploys[0];
        assert_eq!(name, FUND_ME_CONTRACT);
        assert_eq!(options.constructor_args, SEPOLIA_FEED.abi_encode());
        assert_eq!(options.confirmations, 6);
    }

    #[tokio::test]
    async fn confirmations_default_to_one_without_an_override() {
        let deployer = FakeDeployer::default();

        deploy_fund_me::deploy_and_verify(
            &live_network(),
            &sepolia_registry(SEPOLIA_FEED, None),
            &accounts(),
            &deployer,
            None::<&FakeVerifier>,
        )
        .await
        .expect("Failed to deploy on live network");

        let deploys = deployer.recorded_deploys();
        assert_eq!(deploys[0].1.confirmations, DEFAULT_CONFIRMATIONS);
    }

    #[tokio::test]
    async fn unknown_chain_fails_before_any_deploy() {
        let deployer = FakeDeployer::default();

        let result = deploy_fund_me::deploy_and_verify(
            &live_network(),
            &empty_registry(),
            &accounts(),
            &deployer,
            None::<&FakeVerifier>,
        )
        .await;

        assert!(matches!(
            result,
            Err(deploy_fund_me::Error::UnsupportedNetwork {
                chain_id: SEPOLIA_CHAIN_ID
            })
        ));
        assert!(deployer.recorded_deploys().is_empty());
        assert!(deployer.recorded_gets().is_empty());
    }

    #[tokio::test]
    async fn missing_mock_fails_before_any_deploy() {
        let deployer = FakeDeployer::default();

        let result = deploy_fund_me::deploy_and_verify(
            &dev_network(),
            &NetworkRegistry::default(),
            &accounts(),
            &deployer,
            None::<&FakeVerifier>,
        )
        .await;

        assert!(matches!(result, Err(deploy_fund_me::Error::MockNotDeployed(_))));
        assert!(deployer.recorded_deploys().is_empty());
    }
}

mod verification {
    use super::*;

    #[tokio::test]
    async fn live_network_with_credential_verifies_the_deployment() {
        let deployer = FakeDeployer::default();
        let verifier = FakeVerifier::default();

        let deployed = deploy_fund_me::deploy_and_verify(
            &live_network(),
            &sepolia_registry(SEPOLIA_FEED, Some(6)),
            &accounts(),
            &deployer,
            Some(&verifier),
        )
        .await
        .expect("Failed to deploy on live network");

        let calls = verifier.recorded_calls();
        assert_eq!(calls.len(), 1);
        let (contract, address, constructor_args) = &calls[0];
        assert_eq!(contract, FUND_ME_CONTRACT);
        assert_eq!(*address, deployed.address);

        // Verification must see exactly the args the contract was deployed with.
        let deploys = deployer.recorded_deploys();
        assert_eq!(*constructor_args, deploys[0].1.constructor_args);
        assert_eq!(*constructor_args, SEPOLIA_FEED.abi_encode());
    }

    #[tokio::test]
    async fn without_a_verifier_the_deployment_is_unchanged() {
        let with_verifier = FakeDeployer::default();
        let without_verifier = FakeDeployer::default();
        let verifier = FakeVerifier::default();
        let registry = sepolia_registry(SEPOLIA_FEED, Some(6));

        deploy_fund_me::deploy_and_verify(&live_network(), &registry, &accounts(), &with_verifier, Some(&verifier))
            .await
            .expect("Failed to deploy");
        deploy_fund_me::deploy_and_verify(
            &live_network(),
            &registry,
            &accounts(),
            &without_verifier,
            None::<&FakeVerifier>,
        )
        .await
        .expect("Failed to deploy");

        assert_eq!(with_verifier.recorded_deploys(), without_verifier.recorded_deploys());
    }

    #[tokio::test]
    async fn failed_verification_does_not_fail_the_run() {
        let deployer = FakeDeployer::default();
        let verifier = FakeVerifier::failing();

        let deployed = deploy_fund_me::deploy_and_verify(
            &live_network(),
            &sepolia_registry(SEPOLIA_FEED, Some(6)),
            &accounts(),
            &deployer,
            Some(&verifier),
        )
        .await
        .expect("A failed verification must not fail the run");

        assert_eq!(deployed.address, DEPLOYED_AT);
        assert_eq!(verifier.recorded_calls().len(), 1);
        assert_eq!(deployer.recorded_deploys().len(), 1);
    }
}

mod mocks {
    use super::*;

    #[tokio::test]
    async fn development_chain_gets_a_mock_aggregator() {
        let deployer = FakeDeployer::default();

        let deployed = deploy_mocks::deploy_mocks(&dev_network(), &accounts(), &deployer)
            .await
            .expect("Failed to deploy mocks")
            .expect("Expected a mock deployment on a development chain");

        assert_eq!(deployed.address, DEPLOYED_AT);

        let deploys = deployer.recorded_deploys();
        assert_eq!(deploys.len(), 1);
        let (name, options) = &deploys[0];
        assert_eq!(name, MOCK_AGGREGATOR_CONTRACT);

        let expected_answer = I256::from_raw(U256::from(MOCK_INITIAL_ANSWER));
        assert_eq!(
            options.constructor_args,
            (MOCK_DECIMALS, expected_answer).abi_encode_params()
        );
    }

    #[tokio::test]
    async fn live_network_skips_mocks() {
        let deployer = FakeDeployer::default();

        let deployed = deploy_mocks::deploy_mocks(&live_network(), &accounts(), &deployer)
            .await
            .expect("Failed to run mocks script");

        assert_eq!(deployed, None);
        assert!(deployer.recorded_deploys().is_empty());
    }
}
