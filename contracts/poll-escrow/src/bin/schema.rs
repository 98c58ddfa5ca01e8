use std::env::current_dir;
use std::fs::create_dir_all;

use cosmwasm_schema::{export_schema_with_title, remove_schemas, schema_for};

use poll_escrow::msg::{
    ConfigResponse, CustodyResponse, ExecuteMsg, InstantiateMsg, ListPollsResponse,
    ListVotesResponse, PollResponse, QueryMsg, ReceiveMsg, ReservationCostResponse,
    ReservationResponse, ShareResponse, StateResponse, VoteResponse,
};
use poll_escrow::state::{Poll, Vote};

fn main() {
    // Define the path where the schema will be saved
    let mut out_dir = current_dir().unwrap();
    out_dir.push("schema");
    create_dir_all(&out_dir).unwrap();
    remove_schemas(&out_dir).unwrap();

    // Export schema for messages
    export_schema_with_title(&schema_for!(InstantiateMsg), &out_dir, "InstantiateMsg");
    export_schema_with_title(&schema_for!(ExecuteMsg), &out_dir, "ExecuteMsg");
    export_schema_with_title(&schema_for!(ReceiveMsg), &out_dir, "ReceiveMsg");
    export_schema_with_title(&schema_for!(QueryMsg), &out_dir, "QueryMsg");

    // Export schema for query responses
    export_schema_with_title(&schema_for!(ConfigResponse), &out_dir, "ConfigResponse");
    export_schema_with_title(&schema_for!(StateResponse), &out_dir, "StateResponse");
    export_schema_with_title(&schema_for!(PollResponse), &out_dir, "PollResponse");
    export_schema_with_title(&schema_for!(ListPollsResponse), &out_dir, "ListPollsResponse");
    export_schema_with_title(&schema_for!(VoteResponse), &out_dir, "VoteResponse");
    export_schema_with_title(&schema_for!(ListVotesResponse), &out_dir, "ListVotesResponse");
    export_schema_with_title(&schema_for!(ShareResponse), &out_dir, "ShareResponse");
    export_schema_with_title(&schema_for!(CustodyResponse), &out_dir, "CustodyResponse");
    export_schema_with_title(&schema_for!(ReservationResponse), &out_dir, "ReservationResponse");
    export_schema_with_title(
        &schema_for!(ReservationCostResponse),
        &out_dir,
        "ReservationCostResponse",
    );

    // Export schema for stored records
    export_schema_with_title(&schema_for!(Poll), &out_dir, "Poll");
    export_schema_with_title(&schema_for!(Vote), &out_dir, "Vote");
}
