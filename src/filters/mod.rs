pub mod message_filter;
