pub mod agent_server;
